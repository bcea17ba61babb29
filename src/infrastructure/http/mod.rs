//! Outbound HTTP - JSON GET client with bounded retries

mod client;
mod retry;

pub use client::{HttpClient, HttpClientConfig, HttpClientTrait};
pub use retry::{
    is_retryable_status, Backoff, ExponentialJitterBackoff, RetryDecision, RetryPolicy, Sleeper,
    TokioSleeper, DEFAULT_MAX_RETRIES,
};

#[cfg(test)]
pub use client::mock::MockHttpClient;
