//! Domain layer - Core business logic and entities

pub mod cache;
pub mod error;
pub mod geocoding;
pub mod weather;

pub use cache::{generate_key, Cache, CacheExt, CacheKeyGenerator, CacheKeyParams, Sha256KeyGenerator};
pub use error::DomainError;
pub use geocoding::{AddressCandidate, GeocodingOptions, GeocodingProvider};
pub use weather::{
    Coordinates, CurrentWeather, DailyForecast, ForecastResult, WeatherCodeTranslator,
    WeatherCondition, WeatherProvider, WmoCodeTranslator,
};
