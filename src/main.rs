//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cdnsieve` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Process exit status
//!
//! All core functionality is implemented in the library crate. Surviving
//! domains go to stdout, one per line; everything else goes to stderr so the
//! output can be piped straight into the next tool.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use cdnsieve::{init_logger_with, run_filter, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the filter using the library; the summary is logged on stderr
    match run_filter(config).await {
        Ok(_report) => Ok(()),
        Err(e) => {
            eprintln!("cdnsieve error: {:#}", e);
            process::exit(1);
        }
    }
}
