//! Backoff for link requests that got no response.

use std::time::Duration;

use backon::ExponentialBuilder;

pub const DEFAULT_MAX_RETRIES: usize = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 10_000;

/// How often and how patiently a silent host is asked again.
///
/// Only transport failures are retried; an error status is an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    /// Delay before the first retry; doubles after each one.
    pub first_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_millis(
            DEFAULT_MAX_RETRIES,
            DEFAULT_RETRY_DELAY_MS,
            DEFAULT_MAX_RETRY_DELAY_MS,
        )
    }
}

impl RetryPolicy {
    /// Policy from `[links]` settings. A cap below the first delay is raised
    /// to it.
    pub fn from_millis(max_retries: usize, first_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            first_delay: Duration::from_millis(first_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms.max(first_delay_ms)),
        }
    }

    /// Jittered so parallel checks against one host do not retry in lockstep.
    pub(crate) fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.first_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}
