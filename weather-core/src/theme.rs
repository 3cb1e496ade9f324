//! Condition-dependent color presets.

use serde::{Deserialize, Serialize};

/// Plain 24-bit color; the front-end converts it to whatever its toolkit uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ThemePreset {
    Clear,
    Clouds,
    Rain,
    Snow,
    #[default]
    Default,
}

impl ThemePreset {
    pub const fn all() -> &'static [ThemePreset] {
        &[
            ThemePreset::Clear,
            ThemePreset::Clouds,
            ThemePreset::Rain,
            ThemePreset::Snow,
            ThemePreset::Default,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Clear => "clear",
            ThemePreset::Clouds => "clouds",
            ThemePreset::Rain => "rain",
            ThemePreset::Snow => "snow",
            ThemePreset::Default => "default",
        }
    }

    pub fn background(&self) -> Rgb {
        match self {
            ThemePreset::Clear => Rgb(0x87, 0xce, 0xeb),
            ThemePreset::Clouds => Rgb(0x70, 0x80, 0x90),
            ThemePreset::Rain => Rgb(0x2f, 0x4f, 0x6f),
            ThemePreset::Snow => Rgb(0xe8, 0xf0, 0xf8),
            ThemePreset::Default => Rgb(0x1e, 0x1e, 0x2e),
        }
    }

    pub fn accent(&self) -> Rgb {
        match self {
            ThemePreset::Clear => Rgb(0xff, 0xc1, 0x07),
            ThemePreset::Clouds => Rgb(0xdc, 0xdc, 0xdc),
            ThemePreset::Rain => Rgb(0x4f, 0xc3, 0xf7),
            ThemePreset::Snow => Rgb(0x1e, 0x88, 0xe5),
            ThemePreset::Default => Rgb(0x89, 0xb4, 0xfa),
        }
    }

    /// Text color readable on [`ThemePreset::background`].
    pub fn foreground(&self) -> Rgb {
        match self {
            ThemePreset::Clear | ThemePreset::Snow => Rgb(0x10, 0x10, 0x10),
            ThemePreset::Clouds | ThemePreset::Rain | ThemePreset::Default => {
                Rgb(0xf5, 0xf5, 0xf5)
            }
        }
    }
}

impl std::fmt::Display for ThemePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the preset for a condition or description string, e.g. "Rain" or
/// "light snow". Unknown text gets [`ThemePreset::Default`].
pub fn theme_for(description: &str) -> ThemePreset {
    let text = description.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if has(&["clear"]) {
        ThemePreset::Clear
    } else if has(&["snow", "sleet"]) {
        ThemePreset::Snow
    } else if has(&["rain", "drizzle", "thunderstorm"]) {
        ThemePreset::Rain
    } else if has(&["cloud"]) {
        ThemePreset::Clouds
    } else {
        ThemePreset::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_condition_groups() {
        assert_eq!(theme_for("Clear"), ThemePreset::Clear);
        assert_eq!(theme_for("Clouds"), ThemePreset::Clouds);
        assert_eq!(theme_for("Rain"), ThemePreset::Rain);
        assert_eq!(theme_for("Snow"), ThemePreset::Snow);
    }

    #[test]
    fn rain_and_snow_are_distinct() {
        assert_ne!(theme_for("Rain"), theme_for("Snow"));
        assert_ne!(theme_for("Rain").background(), theme_for("Snow").background());
    }

    #[test]
    fn unknown_description_gets_default() {
        assert_eq!(theme_for("Tornado"), ThemePreset::Default);
        assert_eq!(theme_for(""), ThemePreset::Default);
    }

    #[test]
    fn atmosphere_groups_get_default() {
        for group in ["Mist", "Fog", "Haze", "Smoke", "Dust", "MIST"] {
            assert_eq!(theme_for(group), ThemePreset::Default, "{group}");
        }
    }

    #[test]
    fn free_text_descriptions() {
        assert_eq!(theme_for("light rain"), ThemePreset::Rain);
        assert_eq!(theme_for("Thunderstorm"), ThemePreset::Rain);
        assert_eq!(theme_for("broken clouds"), ThemePreset::Clouds);
        assert_eq!(theme_for("light rain and snow"), ThemePreset::Snow);
        assert_eq!(theme_for("clear sky"), ThemePreset::Clear);
    }

    #[test]
    fn presets_have_unique_backgrounds() {
        let all = ThemePreset::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.background(), b.background(), "{a} vs {b}");
            }
        }
    }
}
