use crate::{WeatherError, WeatherResult, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, city: &str, api_key: &str) -> Result<WeatherResult, WeatherError>;
}

/// Construct the production provider.
pub fn default_provider() -> Result<Box<dyn WeatherProvider>, WeatherError> {
    Ok(Box::new(OpenWeatherProvider::new()?))
}

/// Checks shared by every provider, run before any network I/O.
/// Returns the trimmed `(city, api_key)` pair.
pub fn validate_request<'a>(
    city: &'a str,
    api_key: &'a str,
) -> Result<(&'a str, &'a str), WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::EmptyCity);
    }

    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(WeatherError::InvalidKey);
    }

    Ok((city, api_key))
}
