//! Request and response envelope types

pub mod envelope;
pub mod error;
pub mod query;

pub use envelope::ApiResponse;
pub use error::{ApiError, ApiErrorResponse, ERROR_MESSAGE, GENERIC_ERROR_MESSAGE};
pub use query::{validate_params, validation_messages, Query};
