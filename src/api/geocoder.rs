//! Address autocomplete endpoint

use axum::extract::State;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::api::state::AppState;
use crate::api::types::{validate_params, ApiError, ApiResponse, Query};
use crate::domain::{AddressCandidate, GeocodingOptions};

pub const ADDRESS_LOOKUP_MESSAGE: &str = "Autocomplete results fetched successfully";

/// `GET /geocoder/address_lookup` parameters
#[derive(Debug, Deserialize, Validate)]
pub struct AddressLookupParams {
    #[serde(default)]
    #[validate(custom(function = "validate_query"))]
    pub query: String,
    pub language: Option<String>,
    pub countrycode: Option<String>,
}

impl AddressLookupParams {
    /// Optional parameters forwarded to the provider
    pub fn options(&self) -> GeocodingOptions {
        let mut options = GeocodingOptions::new();

        if let Some(language) = self.language.as_deref().filter(|v| !v.trim().is_empty()) {
            options.insert("language".to_string(), language.to_string());
        }

        if let Some(code) = self.countrycode.as_deref().filter(|v| !v.trim().is_empty()) {
            options.insert("countrycode".to_string(), code.to_string());
        }

        options
    }
}

fn validate_query(query: &str) -> Result<(), ValidationError> {
    if query.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Query can't be blank".into());
        return Err(error);
    }

    Ok(())
}

pub async fn address_lookup(
    State(state): State<AppState>,
    Query(params): Query<AddressLookupParams>,
) -> Result<ApiResponse<Vec<AddressCandidate>>, ApiError> {
    validate_params(&params)?;

    let results = state
        .geocoding_service
        .lookup(&params.query, &params.options())
        .await;

    Ok(ApiResponse::success(ADDRESS_LOOKUP_MESSAGE, results))
}
