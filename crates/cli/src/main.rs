//! Main entry point for the quickbar binary.
//!
//! Parses arguments, sets up logging and error reporting, loads the
//! configuration, and hands off to the overlay.

use std::path::PathBuf;

use clap::Parser;

/// Spotlight-style command overlay for the terminal.
#[derive(Parser, Debug)]
#[command(name = "quickbar", version, about)]
struct Args {
    /// Path to the configuration file.
    #[arg(long, default_value = "quickbar.toml")]
    config: PathBuf,

    /// Make the demo host refuse every message (exercises the failure
    /// path).
    #[arg(long)]
    reject_all: bool,

    /// Append logs to this file. The terminal itself belongs to the
    /// overlay, so nothing is ever logged to stdout.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let mut config = qb_core::load_config(&args.config)?;
    if args.reject_all {
        config.reject_all = true;
    }

    qb_tui::run_app(config)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e))
}
