use anyhow::{Context, Result};
use std::{fs::OpenOptions, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// Log file next to the config file; the terminal itself belongs to the UI.
pub const LOG_FILE_NAME: &str = "weather_app.log";

pub fn init() -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE_NAME)
        .with_context(|| format!("Failed to open log file: {LOG_FILE_NAME}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    tracing::info!("weather-app starting");
    Ok(())
}
