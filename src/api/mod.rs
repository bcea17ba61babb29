//! API layer - HTTP endpoints

pub mod geocoder;
pub mod health;
pub mod router;
pub mod state;
pub mod types;
pub mod weather;

pub use router::create_router_with_state;
pub use state::AppState;
