//! Bounded connection checkout for the cache backing store

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::domain::DomainError;

/// Pool sizing
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections checked out at once
    pub size: usize,
    /// How long `checkout` waits for a free slot
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl PoolConfig {
    pub fn new(size: usize, acquire_timeout: Duration) -> Self {
        Self {
            size: size.max(1),
            acquire_timeout,
        }
    }
}

/// Hands out clones of a shared connection, at most `size` at a time
///
/// A checkout that cannot get a slot within `acquire_timeout` fails with
/// [`DomainError::Cache`]; the caller decides whether that is fatal.
#[derive(Debug)]
pub struct ConnectionPool<C> {
    connection: C,
    permits: Arc<Semaphore>,
    config: PoolConfig,
}

impl<C: Clone> ConnectionPool<C> {
    pub fn new(connection: C, config: PoolConfig) -> Self {
        let size = config.size.max(1);

        Self {
            connection,
            permits: Arc::new(Semaphore::new(size)),
            config: PoolConfig { size, ..config },
        }
    }

    /// Waits for a free slot and returns a connection bound to it
    pub async fn checkout(&self) -> Result<PooledConnection<C>, DomainError> {
        let permit = tokio::time::timeout(
            self.config.acquire_timeout,
            self.permits.clone().acquire_owned(),
        )
        .await
        .map_err(|_| {
            DomainError::cache(format!(
                "Timed out after {:?} waiting for a cache connection",
                self.config.acquire_timeout
            ))
        })?
        .map_err(|_| DomainError::cache("Cache connection pool is closed"))?;

        Ok(PooledConnection {
            connection: self.connection.clone(),
            _permit: permit,
        })
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Slots not currently checked out
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// A checked-out connection; the slot is released on drop
pub struct PooledConnection<C> {
    connection: C,
    _permit: OwnedSemaphorePermit,
}

impl<C> Deref for PooledConnection<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.connection
    }
}

impl<C> DerefMut for PooledConnection<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.connection
    }
}
