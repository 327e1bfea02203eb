//! Resilient fetch client: one logical retrieval against a statistical
//! agency, with per-attempt timeout, bounded retries, exponential backoff
//! with jitter, and a structured log record per attempt.
//!
//! Concurrent fetches share one client instance and its configuration;
//! everything per-call (attempt counter, backoff schedule, log context) is
//! local to the call, so calls never coordinate. There is no rate limiting
//! or admission control here: concurrent callers can hammer the same agency
//! independently.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::retry::RetryConfig;

/// Configuration shared by all fetches issued through one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Budget for a single attempt, applied at the transport layer.
    pub timeout_per_attempt: Duration,
    /// Retry bound, backoff schedule, and retryable-status set.
    pub retry: RetryConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_per_attempt: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

/// Typed failure of one logical retrieval.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Non-retryable HTTP status, surfaced after exactly one attempt.
    #[error("fatal status {status} from {url}")]
    FatalStatus { url: String, status: u16 },

    /// Transient failures persisted past the retry budget.
    #[error("retries exhausted after {attempts} attempt(s) for {url}")]
    RetriesExhausted { url: String, attempts: u32 },

    /// Caller-initiated abort; distinct from exhaustion so callers can tell
    /// "gave up" from "we gave up for you".
    #[error("fetch cancelled for {url}")]
    Cancelled { url: String },

    /// Transport failure that is not worth retrying (e.g. an unusable URL).
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Ephemeral record of one network try, emitted as a structured log event
/// before any retry delay. Observability only; never domain state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAttempt {
    pub attempt: u32,
    pub elapsed: Duration,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl FetchAttempt {
    fn of_status(attempt: u32, elapsed: Duration, status: u16) -> Self {
        Self {
            attempt,
            elapsed,
            status: Some(status),
            error: None,
        }
    }

    fn of_error(attempt: u32, elapsed: Duration, error: &HttpError) -> Self {
        Self {
            attempt,
            elapsed,
            status: None,
            error: Some(error.message().to_owned()),
        }
    }

    fn emit(&self, url: &str, succeeded: bool) {
        let elapsed_ms = self.elapsed.as_millis() as u64;
        if succeeded {
            debug!(
                url,
                attempt = self.attempt,
                elapsed_ms,
                status = self.status,
                "fetch attempt succeeded"
            );
        } else {
            warn!(
                url,
                attempt = self.attempt,
                elapsed_ms,
                status = self.status,
                error = self.error.as_deref(),
                "fetch attempt failed"
            );
        }
    }
}

/// Fetch client shared by all adapters. Holds the transport by reference;
/// tests instantiate independent clients with distinct policies.
#[derive(Clone)]
pub struct FetchClient {
    http: Arc<dyn HttpClient>,
    config: FetchConfig,
}

impl FetchClient {
    pub fn new(http: Arc<dyn HttpClient>, config: FetchConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch without external cancellation. Per-attempt timeouts still apply.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.fetch(url, &CancellationToken::new()).await
    }

    /// One logical retrieval with bounded, observable retries.
    ///
    /// An attempt is retried only on a transport-level error or one of the
    /// configured retryable statuses; any other non-success status is fatal
    /// on the spot. Cancellation aborts the in-flight attempt and skips the
    /// remaining retries.
    pub async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, FetchError> {
        let retry = &self.config.retry;
        let max_attempts = retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled {
                    url: url.to_owned(),
                });
            }

            let request = HttpRequest::get(url)
                .with_timeout_ms(self.config.timeout_per_attempt.as_millis() as u64);
            let started = Instant::now();

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(FetchError::Cancelled {
                        url: url.to_owned(),
                    });
                }
                outcome = self.http.execute(request) => outcome,
            };
            let elapsed = started.elapsed();

            match outcome {
                Ok(response) if response.is_success() => {
                    FetchAttempt::of_status(attempt, elapsed, response.status)
                        .emit(url, true);
                    return Ok(response);
                }
                Ok(response) if retry.should_retry_status(response.status) => {
                    FetchAttempt::of_status(attempt, elapsed, response.status)
                        .emit(url, false);
                }
                Ok(response) => {
                    FetchAttempt::of_status(attempt, elapsed, response.status)
                        .emit(url, false);
                    return Err(FetchError::FatalStatus {
                        url: url.to_owned(),
                        status: response.status,
                    });
                }
                Err(error) if error.retryable() => {
                    FetchAttempt::of_error(attempt, elapsed, &error).emit(url, false);
                }
                Err(error) => {
                    FetchAttempt::of_error(attempt, elapsed, &error).emit(url, false);
                    return Err(FetchError::Transport {
                        url: url.to_owned(),
                        message: error.message().to_owned(),
                    });
                }
            }

            if attempt < max_attempts {
                let delay = retry.delay_for_attempt(attempt - 1);
                tokio::select! {
                    _ = cancel.cancelled() => {
                        return Err(FetchError::Cancelled {
                            url: url.to_owned(),
                        });
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            url: url.to_owned(),
            attempts: max_attempts,
        })
    }
}
