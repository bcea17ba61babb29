//! Weather provider clients

mod open_meteo;

pub use open_meteo::{OpenMeteoClient, DEFAULT_OPEN_METEO_BASE_URL};
