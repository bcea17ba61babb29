//! Application state for shared services

use std::sync::Arc;

use crate::domain::cache::Cache;
use crate::domain::{
    AddressCandidate, DomainError, ForecastResult, GeocodingOptions, GeocodingProvider,
    WeatherProvider,
};
use crate::infrastructure::services::{ForecastService, GeocodingService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub geocoding_service: Arc<dyn GeocodingServiceTrait>,
    pub forecast_service: Arc<dyn ForecastServiceTrait>,
    pub cache: Arc<dyn Cache>,
}

/// Trait for address lookups
#[async_trait::async_trait]
pub trait GeocodingServiceTrait: Send + Sync {
    async fn lookup(&self, query: &str, options: &GeocodingOptions) -> Vec<AddressCandidate>;
}

/// Trait for forecast lookups
#[async_trait::async_trait]
pub trait ForecastServiceTrait: Send + Sync {
    async fn lookup(&self, lat: f64, lon: f64) -> Result<ForecastResult, DomainError>;
}

#[async_trait::async_trait]
impl<P: GeocodingProvider + 'static> GeocodingServiceTrait for GeocodingService<P> {
    async fn lookup(&self, query: &str, options: &GeocodingOptions) -> Vec<AddressCandidate> {
        GeocodingService::lookup(self, query, options).await
    }
}

#[async_trait::async_trait]
impl<P: WeatherProvider + 'static> ForecastServiceTrait for ForecastService<P> {
    async fn lookup(&self, lat: f64, lon: f64) -> Result<ForecastResult, DomainError> {
        ForecastService::lookup(self, lat, lon).await
    }
}

impl AppState {
    pub fn new(
        geocoding_service: Arc<dyn GeocodingServiceTrait>,
        forecast_service: Arc<dyn ForecastServiceTrait>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self {
            geocoding_service,
            forecast_service,
            cache,
        }
    }
}
