//! Roster CLI
//!
//! Drives the VORP engine, the lineup optimizer, and the grade engine from
//! JSON inputs and a league config TOML.

mod cli;
mod config;

use clap::Parser;
use cli::{Cli, CliHandler};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = CliHandler.handle_command(cli.command).await {
        error!("Command failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
