//! Geocoding provider trait

use std::collections::BTreeMap;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::AddressCandidate;
use crate::domain::DomainError;

/// Extra provider parameters (e.g. `language`, `countrycode`), kept sorted
pub type GeocodingOptions = BTreeMap<String, String>;

/// Upstream geocoding API
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Resolves free text into normalized address candidates
    async fn geocode(
        &self,
        query: &str,
        options: &GeocodingOptions,
    ) -> Result<Vec<AddressCandidate>, DomainError>;
}
