use std::path::PathBuf;

use thiserror::Error;

/// Failures of the on-disk config store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config file yet. `ConfigStore::load` turns this into an empty config.
    #[error("Config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Failed to access config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of a single weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("City '{0}' was not found.")]
    CityNotFound(String),

    #[error("The API key is missing or was rejected by the weather service.")]
    InvalidKey,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from weather service: {0}")]
    Parse(#[from] serde_json::Error),
}
