mod aggregator;
mod auth;
mod cli;
mod error;
mod grid;
mod providers;
mod records;
mod snapshot;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting ghdash - GitHub dashboard snapshot builder");
    cli.execute().await
}
