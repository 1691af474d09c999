//! TrustFlow CLI
//!
//! Crummey notice and gift-tax administration from the command line.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trustflow_cli::{Cli, commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries reports
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "Starting trustflow");

    commands::run(cli)?;
    Ok(())
}
