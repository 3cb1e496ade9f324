use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::error::ConfigError;

/// Fixed config file name, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = "weather_app_config.json";

/// Top-level configuration stored on disk.
///
/// Example JSON:
/// ```json
/// { "apiKey": "...", "favorites": ["Paris", "Oslo"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub api_key: String,
    pub favorites: Vec<String>,
}

impl Config {
    /// Returns the API key, or `None` when it is blank.
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    pub fn set_api_key(&mut self, api_key: &str) {
        self.api_key = api_key.trim().to_string();
    }

    pub fn is_favorite(&self, city: &str) -> bool {
        self.favorite_index(city).is_some()
    }

    /// Appends `city` unless it is blank or already present (case-insensitive).
    /// Returns whether the list changed.
    pub fn add_favorite(&mut self, city: &str) -> bool {
        let city = city.trim();
        if city.is_empty() || self.is_favorite(city) {
            return false;
        }

        self.favorites.push(city.to_string());
        true
    }

    /// Returns whether a favorite was removed.
    pub fn remove_favorite(&mut self, city: &str) -> bool {
        match self.favorite_index(city) {
            Some(idx) => {
                self.favorites.remove(idx);
                true
            }
            None => false,
        }
    }

    fn favorite_index(&self, city: &str) -> Option<usize> {
        let city = city.trim().to_lowercase();
        self.favorites.iter().position(|f| f.trim().to_lowercase() == city)
    }
}

/// Reads and writes [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::at(CONFIG_FILE_NAME)
    }
}

impl ConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file. A missing file is reported as [`ConfigError::Missing`].
    pub fn read(&self) -> Result<Config, ConfigError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing(self.path.clone()));
            }
            Err(source) => return Err(ConfigError::Io { path: self.path.clone(), source }),
        };

        serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: self.path.clone(), source })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match self.read() {
            Ok(cfg) => {
                debug!(path = %self.path.display(), favorites = cfg.favorites.len(), "config loaded");
                Ok(cfg)
            }
            Err(ConfigError::Missing(path)) => {
                // First run: no config file, return empty.
                info!(path = %path.display(), "no config file yet, starting empty");
                Ok(Config::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the config file.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|source| ConfigError::Parse { path: self.path.clone(), source })?;

        fs::write(&self.path, json).map_err(io_err)?;
        info!(path = %self.path.display(), "config saved");

        Ok(())
    }
}
