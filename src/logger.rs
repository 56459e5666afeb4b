//! Debug logging support for dynstr
//!
//! When debug mode is enabled via `--debug` or the config file, library
//! events are written to ~/.dynstr/dynstr.log.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

const LOG_FILE_NAME: &str = "dynstr.log";

/// Initialize the debug logging system
///
/// If `debug_enabled` is true, sets up file logging with `filter` as the
/// `EnvFilter` directive. Returns the path to the log file, or None if
/// logging is not enabled.
pub fn init_debug_logging(debug_enabled: bool, filter: &str) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        return Ok(None);
    }

    let log_path = get_log_path()?;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()));

    match file {
        Ok(log_file) => {
            let env_filter = EnvFilter::try_new(filter)
                .with_context(|| format!("Invalid logging filter: {}", filter))?;

            let subscriber = registry()
                .with(
                    fmt::layer()
                        .with_writer(log_file)
                        .with_ansi(false)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(env_filter);

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

            Ok(Some(log_path))
        }
        Err(e) => {
            // Logging is optional, so a missing log file must not stop the run
            eprintln!("Warning: Could not create log file: {}", e);
            Ok(None)
        }
    }
}

fn get_log_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".dynstr").join(LOG_FILE_NAME))
}

/// Get the current log file path without initializing logging
///
/// This is used for the `dynstr config --show` command
pub fn get_current_log_path() -> PathBuf {
    get_log_path().unwrap_or_else(|_| PathBuf::from("~/.dynstr").join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_current_log_path() {
        let path = get_current_log_path();
        assert!(
            path.ends_with(".dynstr/dynstr.log"),
            "Log path should be in the .dynstr directory, got: {}",
            path.display()
        );
    }

    #[test]
    fn test_init_debug_logging_disabled() {
        let result = init_debug_logging(false, "dynstr=info");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), None, "Should return None when debug is disabled");
    }
}
