/// Configuration management for dynstr
///
/// dynstr stores configuration in ~/.dynstr/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::buffer::{DEFAULT_CAPACITY, DEFAULT_GROWTH_SLACK, GrowthPolicy};
use crate::error_helpers::dir_create_error;
use crate::io::SCAN_INCREMENT;

/// Largest growth slack accepted from the config file
const MAX_GROWTH_SLACK: usize = 64 * 1024;

/// dynstr configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Buffer sizing
    #[serde(default)]
    pub buffer: BufferConfig,

    /// Debug logging
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal output
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Capacity of each new line buffer
    #[serde(default = "default_capacity")]
    pub default_capacity: Option<usize>,

    /// Extra bytes allocated whenever a buffer grows
    #[serde(default = "default_growth_slack")]
    pub growth_slack: Option<usize>,

    /// Bytes added to the line scanner's scratch buffer when it fills
    #[serde(default = "default_scan_increment")]
    pub scan_increment: Option<usize>,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            default_capacity: Some(DEFAULT_CAPACITY),
            growth_slack: Some(DEFAULT_GROWTH_SLACK),
            scan_increment: Some(SCAN_INCREMENT),
        }
    }
}

impl BufferConfig {
    pub fn capacity(&self) -> usize {
        self.default_capacity.unwrap_or(DEFAULT_CAPACITY)
    }

    pub fn scan_increment(&self) -> usize {
        self.scan_increment.unwrap_or(SCAN_INCREMENT)
    }

    pub fn policy(&self) -> GrowthPolicy {
        GrowthPolicy::new(self.growth_slack.unwrap_or(DEFAULT_GROWTH_SLACK))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write debug logs to ~/.dynstr/dynstr.log
    #[serde(default = "default_debug")]
    pub debug: Option<bool>,

    /// tracing filter directive
    #[serde(default = "default_filter")]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: Some(false),
            filter: Some("dynstr=info".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Highlight matches in `find` output
    #[serde(default = "default_color")]
    pub color: Option<bool>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: Some(true) }
    }
}

// Default functions for serde
fn default_capacity() -> Option<usize> { Some(DEFAULT_CAPACITY) }
fn default_growth_slack() -> Option<usize> { Some(DEFAULT_GROWTH_SLACK) }
fn default_scan_increment() -> Option<usize> { Some(SCAN_INCREMENT) }
fn default_debug() -> Option<bool> { Some(false) }
fn default_filter() -> Option<String> { Some("dynstr=info".to_string()) }
fn default_color() -> Option<bool> { Some(true) }

/// Get the dynstr state directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;

    let config_dir = home_dir.join(".dynstr");
    fs::create_dir_all(&config_dir)
        .map_err(|e| anyhow::anyhow!(dir_create_error(&config_dir, &e)))?;

    Ok(config_dir)
}

/// Get the configuration file path
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the default configuration file content with comments
fn get_default_config_content() -> &'static str {
    r#"# dynstr Configuration File
#
# Values set here can be overridden by command-line flags.
#
# For more information, run: dynstr config --help

[buffer]
# Capacity in bytes of each new line buffer (default: 200, must be > 0)
default_capacity = 200

# Extra bytes allocated beyond the exact requirement whenever a buffer
# grows (default: 50, max: 65536)
growth_slack = 50

# Bytes added to the line scanner's scratch buffer each time it fills
# (default: 50, must be > 0)
scan_increment = 50

[logging]
# Write debug logs to ~/.dynstr/dynstr.log (default: false)
debug = false

# tracing filter directive used when debug logging is on
filter = "dynstr=info"

[output]
# Highlight matches in `dynstr find` output (default: true)
color = true
"#
}

/// Write the default commented configuration file to `path`
pub fn save_default_config_to(path: &Path) -> Result<()> {
    fs::write(path, get_default_config_content())
        .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

    Ok(())
}

/// Load configuration from ~/.dynstr/config.toml, creating it if needed
pub fn load_config() -> Result<Config> {
    load_config_from(&config_file_path()?)
}

/// Load configuration from `path`
///
/// If the file doesn't exist, creates it with defaults and returns them.
/// If the file is malformed, recreates it with defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        save_default_config_to(path)?;
    }

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = match toml::from_str(&config_str) {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet, so report on stderr
            eprintln!(
                "Warning: malformed config {} replaced with defaults: {}",
                path.display(),
                e
            );
            save_default_config_to(path)?;
            return Ok(Config::default());
        }
    };

    Ok(config)
}

/// Render configuration as TOML
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.buffer.default_capacity == Some(0) {
        anyhow::bail!("Invalid default_capacity: 0 (must leave room for the terminator)");
    }

    if let Some(slack) = config.buffer.growth_slack {
        if slack > MAX_GROWTH_SLACK {
            anyhow::bail!("Invalid growth_slack: {} (max {})", slack, MAX_GROWTH_SLACK);
        }
    }

    if config.buffer.scan_increment == Some(0) {
        anyhow::bail!("Invalid scan_increment: 0 (must be positive)");
    }

    if let Some(filter) = &config.logging.filter {
        if filter.trim().is_empty() {
            anyhow::bail!("Invalid logging filter: empty directive");
        }
    }

    Ok(())
}
