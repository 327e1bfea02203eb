//! Retry policy: exponential backoff with additive jitter and a fixed set of
//! retryable status codes.

use std::time::Duration;

/// Backoff schedule between fetch attempts.
///
/// The delay before attempt n+1 is `base * 2^n + uniform(0, jitter_max)`,
/// capped at `max`. The jitter spreads out retry storms when many logical
/// requests fail together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Delay before the first retry.
    pub base: Duration,
    /// Upper bound of the uniform random offset added to every delay.
    pub jitter_max: Duration,
    /// Ceiling for the exponential component.
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(250),
            jitter_max: Duration::from_millis(100),
            max: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    /// Delay to sleep after failed attempt `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        let exponential = self
            .base
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max);
        let jitter_ms = self.jitter_max.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(fastrand::u64(0..=jitter_ms))
        };
        exponential + jitter
    }

    /// Lower bound of `delay(attempt)`, before jitter. Useful for callers
    /// asserting that pacing actually happened.
    pub fn minimum_delay(self, attempt: u32) -> Duration {
        self.base
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max)
    }
}

/// Bounded-retry configuration for one fetch client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts for one logical request, first try included.
    pub max_attempts: u32,
    /// Backoff schedule between attempts.
    pub backoff: Backoff,
    /// Server-side statuses worth retrying. Everything else non-2xx is
    /// fatal on the first sighting.
    pub retry_on_status: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::default(),
            retry_on_status: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}
