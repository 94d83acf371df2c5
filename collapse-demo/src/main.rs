mod app;
mod cli;
mod components;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};

use crate::cli::Args;

fn init_logging(args: &Args) -> Result<()> {
    match &args.log_file {
        Some(path) => {
            let log_file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(args.log_level, Config::default(), log_file)
                .context("Failed to initialize logger")?;
        }
        None => {
            TermLogger::init(
                args.log_level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )
            .context("Failed to initialize logger")?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    app::run(&args).await
}
