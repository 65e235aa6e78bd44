// Retry/backoff policy.
//
// The backoff is linear (`factor * attempt`), matching the backend's
// observed rate-limit behavior. Exponential growth would change the
// worst-case latency bound consumers plan around.

use std::time::Duration;

use crate::error::Error;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default linear backoff factor, in seconds per attempt.
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

/// Retry budget and delay schedule for transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt (3 retries = up to 4 total tries).
    pub max_retries: u32,
    /// Delay before retry `k` (1-indexed) is `backoff_factor * k` seconds.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep before retry `attempt` (1-indexed).
    pub fn delay(&self, attempt: u32) -> Duration {
        Duration::from_secs_f64(self.backoff_factor.max(0.0) * f64::from(attempt))
    }

    /// Whether `err` may be retried given that `attempt` tries have
    /// already been made.
    pub fn should_retry(&self, err: &Error, attempt: u32) -> bool {
        err.is_retryable() && attempt <= self.max_retries
    }
}
