use anyhow::Context;
use clap::Parser;
use inquire::{Password, PasswordDisplayMode};
use std::sync::Arc;
use tracing::{info, warn};
use weather_core::{Config, ConfigStore, default_provider};

use crate::{app::App, logging, tui::Runtime};

/// Top-level CLI struct. The app takes no flags; clap supplies `--help` and `--version`.
#[derive(Debug, Parser)]
#[command(name = "weather-app", version, about = "Look up current weather by city")]
pub struct Cli {}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        logging::init()?;

        let store = ConfigStore::default();
        let (mut config, startup_error) = match store.load() {
            Ok(config) => (config, None),
            Err(e) => {
                warn!(error = %e, "starting with empty config");
                (Config::default(), Some(format!("{e}. Starting with empty settings.")))
            }
        };

        if config.api_key().is_none() {
            prompt_for_api_key(&store, &mut config);
        }

        let provider = default_provider().context("Failed to build HTTP client")?;

        let mut app = App::new(config);
        if let Some(message) = startup_error {
            app.set_status(message);
        }

        let terminal = ratatui::init();
        let result = Runtime::new(store, Arc::from(provider)).run(terminal, app).await;
        ratatui::restore();

        info!("weather-app exiting");
        result
    }
}

/// First run: ask for the key before the full-screen UI takes over.
/// Skipping is allowed; the key can be entered inside the app later.
fn prompt_for_api_key(store: &ConfigStore, config: &mut Config) {
    let answer = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Press Esc to skip and enter it later in the app")
        .prompt_skippable();

    match answer {
        Ok(Some(key)) if !key.trim().is_empty() => {
            config.set_api_key(&key);
            if let Err(e) = store.save(config) {
                warn!(error = %e, "could not persist API key from first-run prompt");
            }
        }
        Ok(_) => info!("API key prompt skipped"),
        Err(e) => warn!(error = %e, "API key prompt unavailable"),
    }
}
