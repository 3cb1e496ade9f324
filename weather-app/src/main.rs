//! Binary crate for the `weather-app` terminal UI.
//!
//! This crate focuses on:
//! - Startup (logging, config, first-run API key prompt)
//! - The UI state machine and its rendering
//! - Running fetches and config writes requested by the UI

use clap::Parser;

mod app;
mod cli;
mod effect;
mod logging;
mod tui;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
