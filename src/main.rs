use anyhow::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;

use dynstr::cli::{Args, parse_args};
use dynstr::config::{self, Config};
use dynstr::error_helpers::open_input_error;
use dynstr::filter::{LineFilter, LineOp};
use dynstr::logger;

fn main() -> Result<()> {
    let args = parse_args()?;

    match args {
        Args::Run {
            op,
            input,
            debug,
            no_color,
        } => {
            let config = config::load_config()?;
            config::validate_config(&config)?;
            run_filter(op, input.as_deref(), debug, no_color, &config)?;
        }
        Args::Config { show } => {
            show_config(show)?;
        }
    }

    Ok(())
}

fn run_filter(
    op: LineOp,
    input: Option<&Path>,
    debug: bool,
    no_color: bool,
    config: &Config,
) -> Result<()> {
    let debug_enabled = debug || config.logging.debug.unwrap_or(false);
    let filter = config.logging.filter.as_deref().unwrap_or("dynstr=info");
    if let Some(log_path) = logger::init_debug_logging(debug_enabled, filter)? {
        tracing::info!(log = %log_path.display(), ?op, "debug logging enabled");
    }

    let color = !no_color && config.output.color.unwrap_or(true);
    if !color {
        colored::control::set_override(false);
    }

    let mut reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| anyhow::anyhow!(open_input_error(path, &e)))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let line_filter = LineFilter::new(op, &config.buffer, color);
    line_filter.run(&mut reader, &mut writer)?;

    Ok(())
}

fn show_config(show: bool) -> Result<()> {
    let config_path = config::config_file_path()?;
    let config = config::load_config_from(&config_path)?;
    if let Err(e) = config::validate_config(&config) {
        eprintln!("Warning: {}", e);
    }

    if show {
        println!("# {}", config_path.display());
        println!("{}", config::to_toml(&config)?);
        println!("# log file: {}", logger::get_current_log_path().display());
    } else {
        println!("{}", config_path.display());
    }

    Ok(())
}
