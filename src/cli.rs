use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::LineOp;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser)]
#[command(name = "dynstr")]
#[command(about = "Apply byte-string operations to every line of a stream")]
#[command(long_about = "dynstr reads lines from stdin (or --input FILE) and applies one
operation to each of them, writing the result to stdout.

Lines of any length are accepted; the line buffer grows as needed.
Buffer sizing can be tuned in ~/.dynstr/config.toml.

EXAMPLES:
  cat notes.txt | dynstr upper                 Uppercase every line
  dynstr --input notes.txt strip               Keep only ASCII letters
  dynstr replace foo bar < in.txt              Replace every 'foo' with 'bar'
  dynstr replace foo bar --max 1 < in.txt      Replace only the first 'foo'
  dynstr slice --begin 5 --end 10 < in.txt     Bytes 5..10 of each line
  dynstr find TODO < src.txt                   Show offsets of 'TODO'
  dynstr classify < numbers.txt                One JSON report per line
  dynstr config --show                         Show current configuration")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
#[command(propagate_version = true)]
struct Cli {
    /// Write debug logs to ~/.dynstr/dynstr.log
    #[arg(long, global = true)]
    debug: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    /// Read lines from FILE instead of stdin
    #[arg(short = 'i', long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert ASCII letters to uppercase
    Upper,

    /// Convert ASCII letters to lowercase
    Lower,

    /// Remove every byte that is not an ASCII letter
    Strip,

    /// Replace occurrences of PATTERN with REPLACEMENT
    #[command(long_about = "Replace occurrences of PATTERN with REPLACEMENT, left to right.

Text produced by a replacement is never searched again, so a REPLACEMENT
that contains PATTERN is safe. Both PATTERN and REPLACEMENT must be non-empty.

EXAMPLES:
  dynstr replace a b              'a b ab' becomes 'b b bb'
  dynstr replace x long --max 2   'x.x.x' becomes 'long.long.x'")]
    Replace {
        /// Literal text to search for
        #[arg(value_name = "PATTERN")]
        pattern: String,

        /// Literal text to insert
        #[arg(value_name = "REPLACEMENT")]
        replacement: String,

        /// Replace at most N occurrences per line
        #[arg(long, value_name = "N")]
        max: Option<usize>,
    },

    /// Print the bytes between two cut points of each line
    #[command(long_about = "Print the bytes between two cut points of each line.

Cut point K sits just before byte K. Without --end the slice runs to the end
of the line; without either bound the whole line is printed. Lines where the
range is empty or out of bounds print as blank lines.

--end may only be given together with --begin.")]
    Slice {
        /// First cut point
        #[arg(long, value_name = "B")]
        begin: Option<usize>,

        /// Second cut point
        #[arg(long, value_name = "E", requires = "begin")]
        end: Option<usize>,
    },

    /// Report byte offsets of NEEDLE in each line
    Find {
        /// Literal text to search for
        #[arg(value_name = "NEEDLE")]
        needle: String,

        /// Start searching at this byte offset
        #[arg(long, value_name = "N", default_value_t = 0)]
        from: usize,
    },

    /// Emit a JSON classification of each line
    Classify,

    /// Show or create the configuration file
    #[command(long_about = "Manage the dynstr configuration file (~/.dynstr/config.toml).

Without flags, prints the path of the configuration file, creating it with
defaults if it doesn't exist.

CONFIGURATION OPTIONS:
  [buffer]
    default_capacity = 200   # Capacity of each new line buffer
    growth_slack = 50        # Extra bytes allocated on growth
    scan_increment = 50      # Scratch growth step while scanning a line

  [logging]
    debug = false            # Write debug logs
    filter = \"dynstr=info\"   # tracing filter directive

  [output]
    color = true             # Highlight matches in 'find'

EXAMPLES:
  dynstr config                  Print the config file path
  dynstr config --show           Show current configuration")]
    Config {
        /// Show current configuration
        #[arg(long = "show")]
        show: bool,
    },
}

pub fn parse_args() -> Result<Args> {
    let cli = Cli::parse();
    Ok(into_args(cli))
}

fn into_args(cli: Cli) -> Args {
    let op = match cli.command {
        Commands::Config { show } => return Args::Config { show },
        Commands::Upper => LineOp::Upper,
        Commands::Lower => LineOp::Lower,
        Commands::Strip => LineOp::Strip,
        Commands::Replace {
            pattern,
            replacement,
            max,
        } => LineOp::Replace {
            pattern,
            replacement,
            max,
        },
        Commands::Slice { begin, end } => LineOp::Slice { begin, end },
        Commands::Find { needle, from } => LineOp::Find { needle, from },
        Commands::Classify => LineOp::Classify,
    };

    Args::Run {
        op,
        input: cli.input,
        debug: cli.debug,
        no_color: cli.no_color,
    }
}

#[derive(Debug)]
pub enum Args {
    Run {
        op: LineOp,
        input: Option<PathBuf>,
        debug: bool,
        no_color: bool,
    },
    Config {
        show: bool,
    },
}
