//! Geo Weather Gateway
//!
//! A caching proxy in front of two public APIs:
//! - Address autocomplete backed by OpenCage
//! - Current weather and a daily forecast backed by Open-Meteo
//!
//! Upstream responses are normalized, cached in Redis or in memory, and
//! fetched through a client that retries transient failures.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::cache::Cache;
use infrastructure::cache::CacheFactory;
use infrastructure::geocoding::OpenCageGeocoder;
use infrastructure::http::{HttpClient, HttpClientConfig};
use infrastructure::services::{
    CacheAsideConfig, ForecastService, GeocodingService, FORECAST_CACHE_NAMESPACE,
    GEOCODING_CACHE_NAMESPACE,
};
use infrastructure::weather::OpenMeteoClient;
use tracing::info;

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = CacheFactory::new().create(&config.cache).await?;
    info!(backend = ?config.cache.backend, "Cache backing store ready");

    create_app_state_with_cache(config, cache)
}

/// Create the application state around an existing cache store
pub fn create_app_state_with_cache(
    config: &AppConfig,
    cache: Arc<dyn Cache>,
) -> anyhow::Result<AppState> {
    let http = HttpClient::new(&HttpClientConfig {
        timeout: Duration::from_secs(config.http.timeout_secs),
        max_retries: config.http.max_retries,
    })?;

    let geocoder = OpenCageGeocoder::with_base_url(
        http.clone(),
        config.geocoding.api_key.clone(),
        config.geocoding.base_url.clone(),
    )
    .with_limit(config.geocoding.limit);

    let geocoding_service = GeocodingService::with_config(
        geocoder,
        cache.clone(),
        CacheAsideConfig::new(GEOCODING_CACHE_NAMESPACE)
            .with_ttl(config.geocoding.ttl())
            .with_fail_open(config.cache.fail_open),
    );

    let weather = OpenMeteoClient::with_base_url(http, config.weather.base_url.clone());

    let forecast_service = ForecastService::with_config(
        weather,
        cache.clone(),
        CacheAsideConfig::new(FORECAST_CACHE_NAMESPACE)
            .with_ttl(config.weather.ttl())
            .with_fail_open(config.cache.fail_open),
    );

    Ok(AppState::new(
        Arc::new(geocoding_service),
        Arc::new(forecast_service),
        cache,
    ))
}
