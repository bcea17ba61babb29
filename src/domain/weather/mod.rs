//! Weather domain - Forecast shapes, condition codes and the provider port

mod condition;
mod coordinates;
mod forecast;
mod provider;

pub use condition::{WeatherCodeTranslator, WeatherCondition, WmoCodeTranslator};
pub use coordinates::{validate_latitude, validate_longitude, Coordinates};
pub use forecast::{CurrentWeather, DailyForecast, ForecastResult};
pub use provider::WeatherProvider;

#[cfg(test)]
pub use provider::MockWeatherProvider;
