use serde::{Deserialize, Serialize};

use super::WeatherCondition;

/// Conditions right now at the requested location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub wind_speed: f64,
    pub condition: WeatherCondition,
}

/// One day of the daily forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// ISO calendar date as reported by the provider (`YYYY-MM-DD`)
    pub date: String,
    /// `None` when the provider has no model data for the day
    pub max_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub condition: WeatherCondition,
}

/// Normalized forecast returned to clients and stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub current_weather: CurrentWeather,
    pub daily_forecast: Vec<DailyForecast>,
}
