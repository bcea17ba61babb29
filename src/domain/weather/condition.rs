//! Weather condition codes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical weather condition reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    #[serde(rename = "Thunderstorm with Hail")]
    ThunderstormWithHail,
    Unknown,
}

impl WeatherCondition {
    /// Maps a WMO weather interpretation code; codes outside the table are `Unknown`
    pub fn from_wmo_code(code: i64) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            61 | 63 | 65 => Self::Rain,
            71 | 73 | 75 => Self::Snow,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormWithHail,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormWithHail => "Thunderstorm with Hail",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translates provider weather codes into conditions
pub trait WeatherCodeTranslator: Send + Sync + fmt::Debug {
    /// Total: every code yields a condition
    fn translate(&self, code: i64) -> WeatherCondition;
}

/// Translator for the WMO code table used by Open-Meteo
#[derive(Debug, Clone, Copy, Default)]
pub struct WmoCodeTranslator;

impl WeatherCodeTranslator for WmoCodeTranslator {
    fn translate(&self, code: i64) -> WeatherCondition {
        WeatherCondition::from_wmo_code(code)
    }
}
