//! Cache infrastructure - Cache implementations

mod factory;
mod in_memory;
mod pool;
mod redis;

pub use factory::CacheFactory;
pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
pub use pool::{ConnectionPool, PoolConfig, PooledConnection};
pub use redis::{RedisCache, RedisCacheConfig};
