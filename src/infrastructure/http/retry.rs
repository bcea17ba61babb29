//! Retry policy for upstream calls
//!
//! Retried: 429, 500, 502, 503, 504 and network faults (timeouts, refused or
//! reset connections, bodies cut off mid-stream). Everything else fails on the
//! first attempt.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::StatusCode;

/// Additional attempts after the first one
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const RETRYABLE_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Error classification for retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Should retry the request
    Retry,
    /// Should not retry - permanent failure
    NoRetry,
}

/// Check if a status code is retryable
pub fn is_retryable_status(status: StatusCode) -> RetryDecision {
    if RETRYABLE_STATUSES.contains(&status) {
        RetryDecision::Retry
    } else {
        RetryDecision::NoRetry
    }
}

/// Check if a transport-level reqwest error is retryable
pub fn classify_transport_error(error: &reqwest::Error) -> RetryDecision {
    if error.is_timeout() || error.is_connect() || error.is_request() || error.is_body() {
        return RetryDecision::Retry;
    }

    if let Some(status) = error.status() {
        return is_retryable_status(status);
    }

    RetryDecision::NoRetry
}

/// Check if a failure while reading a response body is retryable
///
/// The status line already arrived, so anything short of a builder error is the
/// connection dropping mid-stream.
pub fn classify_body_error(error: &reqwest::Error) -> RetryDecision {
    if error.is_builder() {
        RetryDecision::NoRetry
    } else {
        RetryDecision::Retry
    }
}

/// Delay before a retry; `attempt` is 1 for the first retry
pub trait Backoff: Send + Sync + Debug {
    fn delay(&self, attempt: u32) -> Duration;
}

/// `2^attempt` seconds plus up to one second of random jitter
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialJitterBackoff;

impl Backoff for ExponentialJitterBackoff {
    fn delay(&self, attempt: u32) -> Duration {
        let base = 2f64.powi(attempt.min(30) as i32);
        let jitter: f64 = rand::thread_rng().gen_range(0.0..=1.0);
        Duration::from_secs_f64(base + jitter)
    }
}

/// Suspends the caller between attempts
#[async_trait]
pub trait Sleeper: Send + Sync + Debug {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the first request
    pub max_retries: u32,
    pub backoff: Arc<dyn Backoff>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Arc::new(ExponentialJitterBackoff),
        }
    }

    /// Replaces the backoff strategy
    pub fn with_backoff(mut self, backoff: Arc<dyn Backoff>) -> Self {
        self.backoff = backoff;
        self
    }
}
