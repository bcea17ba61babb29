//! Geocoding provider clients

mod opencage;

pub use opencage::{OpenCageGeocoder, DEFAULT_OPENCAGE_BASE_URL, DEFAULT_RESULT_LIMIT};
