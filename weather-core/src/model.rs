use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one successful lookup. Lives only until the next search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    /// City name as the provider resolved it, e.g. "Paris" for "paris,fr".
    pub city_name: String,
    /// Resolved location for display, e.g. "Paris, FR".
    pub location: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Degrees Celsius.
    pub feels_like: f64,
    /// Condition group reported by the provider ("Clear", "Rain", ...).
    pub condition: String,
    pub description: String,
    /// Provider icon code, e.g. "10d".
    pub icon_ref: String,
    pub humidity: u8,
    /// Meters per second.
    pub wind_speed: f64,
    pub observed_at: DateTime<Utc>,
}

impl WeatherResult {
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon_ref)
    }

    /// Terminal glyph for the icon code. Codes share a two-digit condition
    /// prefix followed by `d`/`n` for day or night.
    pub fn icon_glyph(&self) -> &'static str {
        let night = self.icon_ref.ends_with('n');
        match self.icon_ref.get(..2).unwrap_or_default() {
            "01" if night => "☾",
            "01" => "☀",
            "02" => "⛅",
            "03" | "04" => "☁",
            "09" | "10" => "☂",
            "11" => "⚡",
            "13" => "❄",
            "50" => "≋",
            _ => "?",
        }
    }
}
