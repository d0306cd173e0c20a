use std::num::NonZeroU32;
use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type GovernorRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Default outgoing requests per second for the link check.
pub const DEFAULT_RPS: u32 = 10;

/// A shared requests-per-second limiter.
///
/// Clones share one quota, so every task of a link check draws from the
/// same budget.
#[derive(Clone)]
pub struct RequestRateLimiter {
    inner: Arc<GovernorRateLimiter>,
}

impl RequestRateLimiter {
    /// `requests_per_second` of 0 is treated as 1.
    pub fn new(requests_per_second: u32) -> Self {
        let rps = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);

        Self {
            inner: Arc::new(RateLimiter::direct(Quota::per_second(rps))),
        }
    }

    /// Wait until another request may be sent.
    pub async fn wait(&self) {
        self.inner.until_ready().await;
    }
}
