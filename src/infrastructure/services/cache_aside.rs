//! Cache-aside lookups over a [`Cache`] store

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::domain::cache::{generate_key, Cache, CacheExt, CacheKeyGenerator, CacheKeyParams, Sha256KeyGenerator};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_cache_lookup, CacheLookupResult};

/// Configuration for a cache-aside namespace
#[derive(Debug, Clone)]
pub struct CacheAsideConfig {
    /// Prefix for every key written by this instance
    pub namespace: String,
    pub ttl: Duration,
    /// Call the producer when the store fails instead of failing the lookup
    pub fail_open: bool,
}

impl Default for CacheAsideConfig {
    fn default() -> Self {
        Self {
            namespace: "cache".to_string(),
            ttl: Duration::from_secs(24 * 60 * 60),
            fail_open: true,
        }
    }
}

impl CacheAsideConfig {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_fail_open(mut self, fail_open: bool) -> Self {
        self.fail_open = fail_open;
        self
    }
}

/// Fetch-or-compute over a shared cache store
///
/// A hit returns the stored value without calling the producer. A miss calls
/// the producer, stores its value under the namespace TTL and returns it.
/// Producer errors are returned as-is and never stored.
#[derive(Debug, Clone)]
pub struct CacheAside {
    cache: Arc<dyn Cache>,
    config: CacheAsideConfig,
    key_generator: Sha256KeyGenerator,
}

impl CacheAside {
    pub fn new(cache: Arc<dyn Cache>, config: CacheAsideConfig) -> Self {
        Self {
            cache,
            config,
            key_generator: Sha256KeyGenerator::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Namespaced SHA-256 key for a raw string
    pub fn key_for(&self, raw: &str) -> String {
        format!("{}:{}", self.config.namespace, generate_key(raw))
    }

    /// Namespaced key for a query plus its options
    pub fn key_for_params(&self, params: &CacheKeyParams) -> String {
        self.key_generator
            .generate_with_namespace(&self.config.namespace, params)
    }

    pub async fn fetch<T, F, Fut>(&self, key: &str, producer: F) -> Result<T, DomainError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, DomainError>> + Send,
    {
        let namespace = self.config.namespace.as_str();

        // An entry that no longer decodes as `T` surfaces as a store error
        match self.cache.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!(namespace, key, "Cache hit");
                record_cache_lookup(namespace, CacheLookupResult::Hit);
                return Ok(value);
            }
            Ok(None) => {
                debug!(namespace, key, "Cache miss");
                record_cache_lookup(namespace, CacheLookupResult::Miss);
            }
            Err(e) => {
                record_cache_lookup(namespace, CacheLookupResult::Error);
                self.degrade(key, e)?;
            }
        }

        let value = producer().await?;

        if let Err(e) = self.cache.set(key, &value, self.config.ttl).await {
            self.degrade(key, e)?;
        }

        Ok(value)
    }

    fn degrade(&self, key: &str, error: DomainError) -> Result<(), DomainError> {
        if !self.config.fail_open {
            return Err(error);
        }

        warn!(
            namespace = %self.config.namespace,
            key,
            error = %error,
            "Cache store unavailable, bypassing cache"
        );
        Ok(())
    }
}
