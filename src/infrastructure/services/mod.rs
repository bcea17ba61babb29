//! Application services

mod cache_aside;
mod forecast_service;
mod geocoding_service;

pub use cache_aside::{CacheAside, CacheAsideConfig};
pub use forecast_service::{ForecastService, FORECAST_CACHE_NAMESPACE, FORECAST_CACHE_TTL};
pub use geocoding_service::{GeocodingService, GEOCODING_CACHE_NAMESPACE};
