//! Binary crate for the `eltiempo` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments (one subcommand per adapter variant)
//! - Interactive configuration of API keys
//! - Printing the rendered fragments

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
