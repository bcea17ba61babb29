//! Address lookup with caching

use std::sync::Arc;

use tracing::{error, instrument, warn};

use crate::domain::cache::{Cache, CacheKeyParams};
use crate::domain::{AddressCandidate, GeocodingOptions, GeocodingProvider};

use super::cache_aside::{CacheAside, CacheAsideConfig};

pub const GEOCODING_CACHE_NAMESPACE: &str = "Geocoding";

/// Address lookup service
///
/// Never fails: a blank query, an upstream outage or an unparseable
/// response all come back as an empty list, with the cause logged.
pub struct GeocodingService<P: GeocodingProvider> {
    provider: P,
    cache: CacheAside,
}

impl<P: GeocodingProvider> GeocodingService<P> {
    pub fn new(provider: P, cache: Arc<dyn Cache>) -> Self {
        Self::with_config(provider, cache, CacheAsideConfig::new(GEOCODING_CACHE_NAMESPACE))
    }

    pub fn with_config(provider: P, cache: Arc<dyn Cache>, config: CacheAsideConfig) -> Self {
        Self {
            provider,
            cache: CacheAside::new(cache, config),
        }
    }

    /// Key over the query and its options; option order does not matter
    pub fn cache_key(&self, query: &str, options: &GeocodingOptions) -> String {
        self.cache
            .key_for_params(&CacheKeyParams::new(query).with_components(options))
    }

    #[instrument(skip(self, options))]
    pub async fn lookup(&self, query: &str, options: &GeocodingOptions) -> Vec<AddressCandidate> {
        if query.trim().is_empty() {
            warn!("Address lookup skipped: query is blank");
            return Vec::new();
        }

        let key = self.cache_key(query, options);

        match self
            .cache
            .fetch(&key, || self.provider.geocode(query, options))
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(query, error = %e, "Address lookup failed, returning no results");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::geocoding::MockGeocodingProvider;
    use crate::domain::DomainError;
    use std::time::Duration;

    fn candidates() -> Vec<AddressCandidate> {
        vec![AddressCandidate::new(
            "Mountain View, CA, United States of America",
            37.3893889,
            -122.0832101,
        )]
    }

    fn options(pairs: &[(&str, &str)]) -> GeocodingOptions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_lookup_caches_results() {
        let mut provider = MockGeocodingProvider::new();
        provider
            .expect_geocode()
            .times(1)
            .returning(|_, _| Ok(candidates()));

        let cache = Arc::new(MockCache::new());
        let service = GeocodingService::new(provider, cache.clone());

        let first = service.lookup("Mountain View", &GeocodingOptions::new()).await;
        let second = service.lookup("Mountain View", &GeocodingOptions::new()).await;

        assert_eq!(first, candidates());
        assert_eq!(second, first);

        let key = service.cache_key("Mountain View", &GeocodingOptions::new());
        assert!(key.starts_with("Geocoding:"));
        assert_eq!(cache.stored_ttl(&key), Some(Duration::from_secs(86_400)));
    }

    #[tokio::test]
    async fn test_blank_query_skips_provider() {
        let mut provider = MockGeocodingProvider::new();
        provider.expect_geocode().never();

        let cache = Arc::new(MockCache::new());
        let service = GeocodingService::new(provider, cache.clone());

        assert!(service.lookup("   ", &GeocodingOptions::new()).await.is_empty());
        assert!(service.lookup("", &GeocodingOptions::new()).await.is_empty());
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_is_swallowed_and_not_cached() {
        let mut provider = MockGeocodingProvider::new();
        provider
            .expect_geocode()
            .times(2)
            .returning(|_, _| Err(DomainError::transient_upstream(Some(503), "unavailable")));

        let cache = Arc::new(MockCache::new());
        let service = GeocodingService::new(provider, cache.clone());

        assert!(service.lookup("Paris", &GeocodingOptions::new()).await.is_empty());
        assert!(service.lookup("Paris", &GeocodingOptions::new()).await.is_empty());
        assert_eq!(cache.write_count(), 0);
    }

    #[tokio::test]
    async fn test_options_are_forwarded_and_keyed() {
        let mut provider = MockGeocodingProvider::new();
        provider
            .expect_geocode()
            .withf(|query, opts| {
                query.to_string() == "Berlin" && opts.get("language").map(String::as_str) == Some("de")
            })
            .times(1)
            .returning(|_, _| Ok(vec![]));
        provider
            .expect_geocode()
            .withf(|_, opts| opts.is_empty())
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = GeocodingService::new(provider, Arc::new(MockCache::new()));

        service.lookup("Berlin", &options(&[("language", "de")])).await;
        service.lookup("Berlin", &GeocodingOptions::new()).await;

        assert_ne!(
            service.cache_key("Berlin", &options(&[("language", "de")])),
            service.cache_key("Berlin", &GeocodingOptions::new())
        );
    }

    #[test]
    fn test_option_order_does_not_change_key() {
        let service = GeocodingService::new(MockGeocodingProvider::new(), Arc::new(MockCache::new()));

        assert_eq!(
            service.cache_key("Lisbon", &options(&[("language", "pt"), ("countrycode", "pt")])),
            service.cache_key("Lisbon", &options(&[("countrycode", "pt"), ("language", "pt")]))
        );
    }
}
