use serde::{Deserialize, Serialize};

/// Normalized geocoding result
///
/// The provider reports longitude as `lng`; the canonical field is `lon`, and
/// `lng` is still accepted when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCandidate {
    pub full_address: String,
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
}

impl AddressCandidate {
    pub fn new(full_address: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            full_address: full_address.into(),
            lat,
            lon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_canonical_lon() {
        let candidate = AddressCandidate::new("Mountain View, CA, USA", 37.3860517, -122.0838511);
        let json = serde_json::to_value(&candidate).unwrap();

        assert_eq!(json["full_address"], "Mountain View, CA, USA");
        assert_eq!(json["lat"], 37.3860517);
        assert_eq!(json["lon"], -122.0838511);
        assert!(json.get("lng").is_none());
    }

    #[test]
    fn test_decodes_provider_lng_name() {
        let json = r#"{"full_address":"Mountain Home, ID, USA","lat":43.132576,"lng":-115.691198}"#;
        let candidate: AddressCandidate = serde_json::from_str(json).unwrap();

        assert_eq!(
            candidate,
            AddressCandidate::new("Mountain Home, ID, USA", 43.132576, -115.691198)
        );
    }
}
