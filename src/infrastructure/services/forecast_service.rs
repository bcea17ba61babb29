//! Weather forecast lookup with caching

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, instrument, warn};

use crate::domain::cache::Cache;
use crate::domain::{Coordinates, DomainError, ForecastResult, WeatherProvider};

use super::cache_aside::{CacheAside, CacheAsideConfig};

pub const FORECAST_CACHE_NAMESPACE: &str = "WeatherForecast";
pub const FORECAST_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Forecast lookup service
///
/// Unlike address lookups, failures are logged and returned to the caller.
pub struct ForecastService<P: WeatherProvider> {
    provider: P,
    cache: CacheAside,
}

impl<P: WeatherProvider> ForecastService<P> {
    pub fn new(provider: P, cache: Arc<dyn Cache>) -> Self {
        Self::with_config(
            provider,
            cache,
            CacheAsideConfig::new(FORECAST_CACHE_NAMESPACE).with_ttl(FORECAST_CACHE_TTL),
        )
    }

    pub fn with_config(provider: P, cache: Arc<dyn Cache>, config: CacheAsideConfig) -> Self {
        Self {
            provider,
            cache: CacheAside::new(cache, config),
        }
    }

    /// Key over the `"{lat},{lon}"` text of the coordinates
    pub fn cache_key(&self, coordinates: Coordinates) -> String {
        self.cache.key_for(&coordinates.to_string())
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, lat: f64, lon: f64) -> Result<ForecastResult, DomainError> {
        let result = async {
            let coordinates = Coordinates::new(lat, lon)?;
            let key = self.cache_key(coordinates);

            self.cache
                .fetch(&key, || self.provider.forecast(coordinates))
                .await
        }
        .await;

        match &result {
            Err(e @ DomainError::Validation { .. }) => {
                warn!(lat, lon, error = %e, "Weather forecast request rejected");
            }
            Err(e) => {
                error!(lat, lon, error = %e, "Weather forecast lookup failed");
            }
            Ok(_) => {}
        }

        result
    }
}
