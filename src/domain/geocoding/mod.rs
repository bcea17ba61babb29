//! Geocoding domain - Address autocomplete candidates and the provider port

mod address;
mod provider;

pub use address::AddressCandidate;
pub use provider::{GeocodingOptions, GeocodingProvider};

#[cfg(test)]
pub use provider::MockGeocodingProvider;
