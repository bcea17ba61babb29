use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::retry::{
    classify_body_error, classify_transport_error, is_retryable_status, RetryDecision, RetryPolicy, Sleeper,
    TokioSleeper, DEFAULT_MAX_RETRIES,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_upstream_request, record_upstream_retry};

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    /// GETs `url` with the given query parameters and parses the body as JSON
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, DomainError>;
}

/// Settings for the outbound client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-attempt timeout
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Real HTTP client using reqwest, retrying transient failures
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            retry: RetryPolicy::new(config.max_retries),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    async fn get_once(&self, url: &str, query: &[(String, String)]) -> Result<Value, DomainError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| upstream_error(classify_body_error(&e), e))?;

        if !status.is_success() {
            let message = format!("GET {} returned {}: {}", url, status, truncate_body(&body));

            return Err(match is_retryable_status(status) {
                RetryDecision::Retry => {
                    DomainError::transient_upstream(Some(status.as_u16()), message)
                }
                RetryDecision::NoRetry => {
                    DomainError::terminal_upstream(Some(status.as_u16()), message)
                }
            });
        }

        serde_json::from_str(&body).map_err(|e| DomainError::response_parsing(e.to_string()))
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, DomainError> {
        let mut attempt: u32 = 0;

        loop {
            match self.get_once(url, query).await {
                Ok(body) => {
                    if attempt > 0 {
                        info!(url, retries = attempt, "Upstream request succeeded after retries");
                    } else {
                        debug!(url, "Upstream request succeeded");
                    }

                    record_upstream_request("success");
                    return Ok(body);
                }
                Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.backoff.delay(attempt);

                    warn!(
                        url,
                        attempt,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying upstream request"
                    );

                    record_upstream_retry();
                    self.sleeper.sleep(delay).await;
                }
                Err(err) => {
                    error!(url, attempts = attempt + 1, error = %err, "Upstream request failed");

                    record_upstream_request(if err.is_transient() {
                        "transient"
                    } else {
                        "terminal"
                    });
                    return Err(err);
                }
            }
        }
    }
}

/// Maps a reqwest failure, dropping the URL so query parameters (API keys) never reach logs
fn transport_error(error: reqwest::Error) -> DomainError {
    upstream_error(classify_transport_error(&error), error)
}

fn upstream_error(decision: RetryDecision, error: reqwest::Error) -> DomainError {
    let status = error.status().map(|s| s.as_u16());
    let message = format!("Request failed: {}", error.without_url());

    match decision {
        RetryDecision::Retry => DomainError::transient_upstream(status, message),
        RetryDecision::NoRetry => DomainError::terminal_upstream(status, message),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;

    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, RwLock};

    /// Canned JSON responses keyed by URL, recording every call
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, Value>>,
        errors: RwLock<HashMap<String, String>>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        /// Makes `url` fail with a terminal upstream error
        pub fn with_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.errors.write().unwrap().insert(url.into(), error.into());
            self
        }

        pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn get_json(
            &self,
            url: &str,
            query: &[(String, String)],
        ) -> Result<Value, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), query.to_vec()));

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(DomainError::terminal_upstream(Some(500), error.clone()));
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| {
                    DomainError::terminal_upstream(Some(404), format!("No mock response for {}", url))
                })
        }
    }
}
