use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{WeatherError, model::WeatherResult, provider::validate_request};

use super::WeatherProvider;

const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    http: Client,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(OPENWEATHER_API_BASE)
    }

    /// Point the client at another host, e.g. a mock server.
    pub fn with_base_url(base_url: &str) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    async fn fetch_current(&self, city: &str, api_key: &str) -> Result<WeatherResult, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(%url, city, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidKey),
            s => {
                let message = serde_json::from_str::<OwError>(&body)
                    .map(|e| e.message)
                    .unwrap_or_else(|_| truncate_body(&body));
                warn!(status = s.as_u16(), %message, "OpenWeather request failed");
                return Err(WeatherError::Api { status: s.as_u16(), message });
            }
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let observed_at = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);

        let (condition, description, icon_ref) = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description, w.icon))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string(), String::new()));

        let city_name = parsed.name;
        let location = match parsed.sys.country.filter(|c| !c.is_empty()) {
            Some(country) => format!("{city_name}, {country}"),
            None => city_name.clone(),
        };

        info!(%location, %condition, temp = parsed.main.temp, "weather fetched");

        Ok(WeatherResult {
            city_name,
            location,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            condition,
            description,
            icon_ref,
            humidity: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            observed_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwError {
    message: String,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self, api_key), level = "info")]
    async fn fetch(&self, city: &str, api_key: &str) -> Result<WeatherResult, WeatherError> {
        let (city, api_key) = validate_request(city, api_key)?;
        self.fetch_current(city, api_key).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
