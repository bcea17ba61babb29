//! Infrastructure layer - External service implementations

pub mod cache;
pub mod geocoding;
pub mod http;
pub mod logging;
pub mod observability;
pub mod services;
pub mod weather;
