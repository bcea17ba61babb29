//! Redis cache implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::info;

use super::pool::{ConnectionPool, PoolConfig};
use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379/1")
    pub url: String,
    pub pool: PoolConfig,
}

impl RedisCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool: PoolConfig::default(),
        }
    }

    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }
}

/// Redis-backed cache store
///
/// Values are stored with `SET key value EX ttl`. Every command checks a
/// connection out of a bounded [`ConnectionPool`], so a saturated store
/// fails the individual operation after the pool timeout.
pub struct RedisCache {
    pool: ConnectionPool<ConnectionManager>,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("available", &self.pool.available())
            .finish()
    }
}

impl RedisCache {
    /// Connects to Redis, bounded by the pool's acquire timeout
    pub async fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("Failed to create Redis client: {}", e)))?;

        let connection =
            tokio::time::timeout(config.pool.acquire_timeout, ConnectionManager::new(client))
                .await
                .map_err(|_| DomainError::cache("Timed out connecting to Redis"))?
                .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        info!(
            pool_size = config.pool.size,
            "Connected to Redis cache store"
        );

        Ok(Self {
            pool: ConnectionPool::new(connection, config.pool.clone()),
            config,
        })
    }

    fn ttl_secs(ttl: Duration) -> u64 {
        ttl.as_secs().max(1)
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.pool.checkout().await?;

        let result: Option<String> = conn.get(key).await.map_err(|e| {
            DomainError::cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(result)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.pool.checkout().await?;

        let _: () = conn
            .set_ex(key, value, Self::ttl_secs(ttl))
            .await
            .map_err(|e| DomainError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.checkout().await?;

        let exists: bool = conn.exists(key).await.map_err(|e| {
            DomainError::cache(format!("Failed to check existence of key '{}': {}", key, e))
        })?;

        Ok(exists)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.pool.checkout().await?;

        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| DomainError::cache(format!("Redis ping failed: {}", e)))?;

        Ok(())
    }
}
