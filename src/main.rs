//! Keylog Decoder - command line front end
//!
//! Reads a capture log and prints one `[HH:MM:SS] text` line per entry.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use keylog_decoder::{
    config::{Config, OutputFormat},
    decoder::read_log_file,
    keyboard::LayoutTable,
    report::DecodeReport,
    utils::capture_date,
};

#[derive(Parser, Debug)]
#[command(
    name = "keylog-decoder",
    version,
    about = "Decode raw keystroke capture logs into timestamped text",
    arg_required_else_help = true
)]
struct Cli {
    /// File containing capture logs
    #[arg(short = 'f', long = "log-file", value_name = "file")]
    log_file: PathBuf,

    /// Layout table (TOML) to use instead of the configured one
    #[arg(short, long, value_name = "file")]
    layout: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "file")]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text lines
    #[arg(long)]
    json: bool,

    /// Omit entries with no decoded text
    #[arg(long)]
    skip_empty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::load().unwrap_or_else(|e| {
            log::warn!("ignoring config file: {}", e);
            Config::default()
        })),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = load_config(cli.config.as_ref())?;
    if cli.json {
        config.output.format = OutputFormat::Json;
    }
    if cli.skip_empty {
        config.output.skip_empty = true;
    }

    let table = match &cli.layout {
        Some(path) => LayoutTable::load_from(path)
            .with_context(|| format!("failed to load layout {}", path.display()))?,
        None => config
            .layout
            .load_table()
            .context("failed to load configured layout")?,
    };

    let mut entries = read_log_file(&cli.log_file, &table)
        .with_context(|| format!("failed to decode {}", cli.log_file.display()))?;
    if config.output.skip_empty {
        entries.retain(|entry| !entry.text.is_empty());
    }

    let date = capture_date(&cli.log_file);
    let mut out = io::stdout().lock();

    match config.output.format {
        OutputFormat::Json => {
            let report = DecodeReport::new(&cli.log_file, date, &entries);
            writeln!(out, "{}", report.to_json()?)?;
        }
        OutputFormat::Text => {
            if let Some(date) = date {
                writeln!(out, "# capture date: {}", date)?;
            }
            for entry in &entries {
                writeln!(out, "{}", entry)?;
            }
        }
    }

    Ok(())
}
