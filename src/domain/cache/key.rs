//! Cache key generation strategies

use std::collections::BTreeMap;
use std::fmt::Debug;

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of the raw input
pub fn generate_key(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Trait for generating cache keys from input data
pub trait CacheKeyGenerator: Send + Sync + Debug {
    /// Generates a cache key from the given components
    fn generate(&self, params: &CacheKeyParams) -> String;

    /// Generates a key with a namespace prefix
    fn generate_with_namespace(&self, namespace: &str, params: &CacheKeyParams) -> String {
        format!("{}:{}", namespace, self.generate(params))
    }
}

/// Parameters for cache key generation
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParams {
    /// Primary identifier (e.g., the query text)
    pub primary: String,
    /// Secondary components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    /// Creates new cache key parameters with a primary identifier
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    /// Adds a component to the key parameters
    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }

    /// Adds every entry of an option map as a component
    pub fn with_components<'a, I>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (k, v) in components {
            self = self.with_component(k.as_str(), v.as_str());
        }
        self
    }
}

/// Key generator hashing every part with SHA-256
///
/// Each part is fed to the digest with its byte length in front of it, so a
/// separator character inside a query or option value can never make two
/// different parameter sets hash the same input.
#[derive(Debug, Clone, Default)]
pub struct Sha256KeyGenerator;

impl Sha256KeyGenerator {
    /// Creates a new SHA-256 key generator
    pub fn new() -> Self {
        Self
    }

    fn update_part(hasher: &mut Sha256, part: &str) {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
}

impl CacheKeyGenerator for Sha256KeyGenerator {
    fn generate(&self, params: &CacheKeyParams) -> String {
        let mut hasher = Sha256::new();
        Self::update_part(&mut hasher, &params.primary);

        for (k, v) in &params.components {
            Self::update_part(&mut hasher, k);
            Self::update_part(&mut hasher, v);
        }

        hex::encode(hasher.finalize())
    }
}
