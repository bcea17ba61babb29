//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheBackend, CacheSettings, GeocodingSettings, HttpSettings, LogFormat,
    LoggingConfig, MetricsConfig, ServerConfig, WeatherSettings,
};
