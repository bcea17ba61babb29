//! Weather forecast endpoint

use axum::extract::State;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::api::state::AppState;
use crate::api::types::{validate_params, ApiError, ApiResponse, Query};
use crate::domain::weather::{validate_latitude, validate_longitude};
use crate::domain::{DomainError, ForecastResult};

pub const FORECAST_MESSAGE: &str = "Weather forecast fetched successfully";

/// `GET /weather/forecast` parameters, kept as text so every rule can report
#[derive(Debug, Deserialize, Validate)]
pub struct ForecastParams {
    #[serde(default)]
    #[validate(custom(function = "validate_lat"))]
    pub lat: String,
    #[serde(default)]
    #[validate(custom(function = "validate_lon"))]
    pub lon: String,
}

impl ForecastParams {
    /// Numeric coordinates; only meaningful once validation has passed
    fn coordinates(&self) -> Result<(f64, f64), DomainError> {
        Ok((parse_number("Lat", &self.lat)?, parse_number("Lon", &self.lon)?))
    }
}

fn parse_number(name: &str, value: &str) -> Result<f64, DomainError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(DomainError::validation(format!("{} can't be blank", name)));
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DomainError::validation(format!("{} is not a number", name)))
}

fn check(
    name: &str,
    value: &str,
    range: fn(f64) -> Result<(), DomainError>,
) -> Result<(), ValidationError> {
    parse_number(name, value)
        .and_then(range)
        .map_err(|e| {
            let message = match e {
                DomainError::Validation { message } => message,
                other => other.to_string(),
            };

            let mut error = ValidationError::new("coordinate");
            error.message = Some(message.into());
            error
        })
}

fn validate_lat(lat: &str) -> Result<(), ValidationError> {
    check("Lat", lat, validate_latitude)
}

fn validate_lon(lon: &str) -> Result<(), ValidationError> {
    check("Lon", lon, validate_longitude)
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<ApiResponse<ForecastResult>, ApiError> {
    validate_params(&params)?;

    let (lat, lon) = params.coordinates()?;
    let forecast = state.forecast_service.lookup(lat, lon).await?;

    Ok(ApiResponse::success(FORECAST_MESSAGE, forecast))
}
