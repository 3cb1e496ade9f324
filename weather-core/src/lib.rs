//! Core library for the weather app.
//!
//! This crate defines:
//! - The JSON config store (API key and favorite cities)
//! - The weather client behind the `WeatherProvider` trait
//! - Theme presets chosen from the reported conditions
//!
//! It is used by `weather-app`, but has no terminal or UI dependencies.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod theme;

pub use config::{CONFIG_FILE_NAME, Config, ConfigStore};
pub use error::{ConfigError, WeatherError};
pub use model::WeatherResult;
pub use provider::{WeatherProvider, default_provider, openweather::OpenWeatherProvider};
pub use theme::{Rgb, ThemePreset, theme_for};
