use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{AddressCandidate, DomainError, GeocodingOptions, GeocodingProvider};
use crate::infrastructure::http::HttpClientTrait;

pub const DEFAULT_OPENCAGE_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";
pub const DEFAULT_RESULT_LIMIT: u32 = 5;

/// OpenCage forward-geocoding client
#[derive(Debug)]
pub struct OpenCageGeocoder<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    limit: u32,
}

impl<C: HttpClientTrait> OpenCageGeocoder<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENCAGE_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// `q`, `key` and `limit`, with caller options taking precedence
    fn build_params(&self, query: &str, options: &GeocodingOptions) -> Vec<(String, String)> {
        let mut params = GeocodingOptions::new();
        params.insert("q".to_string(), query.to_string());
        params.insert("key".to_string(), self.api_key.clone());
        params.insert("limit".to_string(), self.limit.to_string());

        for (k, v) in options {
            params.insert(k.clone(), v.clone());
        }

        params.into_iter().collect()
    }

    fn parse_response(&self, json: Value) -> Result<Vec<AddressCandidate>, DomainError> {
        let response: OpenCageResponse = serde_json::from_value(json)
            .map_err(|e| DomainError::response_parsing(e.to_string()))?;

        Ok(response
            .results
            .into_iter()
            .map(|result| {
                AddressCandidate::new(result.formatted, result.geometry.lat, result.geometry.lng)
            })
            .collect())
    }
}

#[async_trait]
impl<C: HttpClientTrait> GeocodingProvider for OpenCageGeocoder<C> {
    async fn geocode(
        &self,
        query: &str,
        options: &GeocodingOptions,
    ) -> Result<Vec<AddressCandidate>, DomainError> {
        let params = self.build_params(query, options);
        let response = self.client.get_json(&self.base_url, &params).await?;

        let candidates = self.parse_response(response)?;
        debug!(query, results = candidates.len(), "OpenCage lookup complete");

        Ok(candidates)
    }
}

#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    #[serde(default)]
    results: Vec<OpenCageResult>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    formatted: String,
    geometry: OpenCageGeometry,
}

#[derive(Debug, Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}
