use std::fmt;

use crate::domain::DomainError;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A validated latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        validate_latitude(lat)?;
        validate_longitude(lon)?;

        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

pub fn validate_latitude(lat: f64) -> Result<(), DomainError> {
    check_range("Lat", lat, MIN_LATITUDE, MAX_LATITUDE)
}

pub fn validate_longitude(lon: f64) -> Result<(), DomainError> {
    check_range("Lon", lon, MIN_LONGITUDE, MAX_LONGITUDE)
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), DomainError> {
    if value.is_nan() {
        return Err(DomainError::validation(format!("{} is not a number", name)));
    }

    if value < min {
        return Err(DomainError::validation(format!(
            "{} must be greater than or equal to {}",
            name, min
        )));
    }

    if value > max {
        return Err(DomainError::validation(format!(
            "{} must be less than or equal to {}",
            name, max
        )));
    }

    Ok(())
}
