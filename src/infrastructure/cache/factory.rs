//! Cache factory for runtime selection

use std::sync::Arc;

use tracing::info;

use crate::config::{CacheBackend, CacheSettings};
use crate::domain::cache::Cache;
use crate::domain::DomainError;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::pool::PoolConfig;
use super::redis::{RedisCache, RedisCacheConfig};

/// Builds the configured cache backing store
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, settings: &CacheSettings) -> Result<Arc<dyn Cache>, DomainError> {
        match settings.backend {
            CacheBackend::InMemory => {
                info!(max_capacity = settings.max_capacity, "Using in-memory cache");
                Ok(self.create_in_memory(settings.max_capacity))
            }
            CacheBackend::Redis => {
                if settings.redis_url.trim().is_empty() {
                    return Err(DomainError::configuration(
                        "cache.redis_url is required for the redis backend",
                    ));
                }

                let config = RedisCacheConfig::new(settings.redis_url.clone()).with_pool(
                    PoolConfig::new(settings.pool_size, settings.pool_timeout()),
                );

                let cache = RedisCache::new(config).await?;
                Ok(Arc::new(cache))
            }
        }
    }

    pub fn create_in_memory(&self, max_capacity: u64) -> Arc<dyn Cache> {
        Arc::new(InMemoryCache::with_config(
            InMemoryCacheConfig::default().with_max_capacity(max_capacity),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;
    use std::time::Duration;

    #[tokio::test]
    async fn test_factory_create_in_memory() {
        let cache = CacheFactory::new()
            .create(&CacheSettings::default())
            .await
            .unwrap();

        cache
            .set("test", &"value", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("test").await.unwrap();
        assert_eq!(result, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_factory_create_redis_missing_url() {
        let settings = CacheSettings {
            backend: CacheBackend::Redis,
            redis_url: "  ".to_string(),
            ..Default::default()
        };

        let result = CacheFactory::new().create(&settings).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
