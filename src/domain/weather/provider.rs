//! Weather provider trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Coordinates, ForecastResult};
use crate::domain::DomainError;

/// Upstream forecast API
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches current conditions plus the daily series for a location
    async fn forecast(&self, coordinates: Coordinates) -> Result<ForecastResult, DomainError>;
}
