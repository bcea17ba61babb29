use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Retryable upstream failure (429/5xx gateway statuses, timeouts, refused connections)
    #[error("Transient upstream error{}: {message}", status_suffix(.status))]
    TransientUpstream { status: Option<u16>, message: String },

    /// Upstream failure that retrying will not fix
    #[error("Upstream error{}: {message}", status_suffix(.status))]
    TerminalUpstream { status: Option<u16>, message: String },

    #[error("Response Parsing Error: {message}")]
    ResponseParsing { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn transient_upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::TransientUpstream {
            status,
            message: message.into(),
        }
    }

    pub fn terminal_upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::TerminalUpstream {
            status,
            message: message.into(),
        }
    }

    pub fn response_parsing(message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether another attempt at the same upstream call may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientUpstream { .. })
    }

    /// HTTP status reported by the upstream, if the failure carried one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::TransientUpstream { status, .. } | Self::TerminalUpstream { status, .. } => {
                *status
            }
            _ => None,
        }
    }
}
