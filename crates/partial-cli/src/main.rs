//! partial-extract CLI
//!
//! Scans HTML documents for `extract` annotations and turns each block into
//! a reusable partial plus an inventory record.

mod cli;
mod config;
mod error;
mod logging;
mod run;

use clap::Parser;
use colored::Colorize;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = execute() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn execute() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {}", e)))?;
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let options = config::resolve(&cli, &cwd)?;
    let summary = run::execute(&options, &cli.files, &cwd, cli.dry_run)?;
    run::print_summary(&summary);
    Ok(())
}
