//! Bounded exponential backoff for transient upstream failures.
//!
//! Only errors that report [`UpstreamError::is_transient`] are retried; a
//! rejected batch or a 4xx is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use docsift_types::RetryConfig;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{UpstreamError, UpstreamResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), base_delay, max_delay }
    }

    /// Single attempt, no backoff.
    pub const fn none() -> Self {
        Self { max_attempts: 1, base_delay: Duration::ZERO, max_delay: Duration::ZERO }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry number `attempt + 1` (0-based): `base * 2^attempt`, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base_ms = self.base_delay.as_millis() as u64;
        let max_ms = self.max_delay.as_millis() as u64;
        let calculated_ms = base_ms.saturating_mul(2_u64.saturating_pow(attempt)).min(max_ms);
        Duration::from_millis(calculated_ms)
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> UpstreamResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    info!(
                        "[Retry] {} failed ({}), attempt={}/{}, backing off {}ms",
                        operation,
                        err,
                        attempt + 1,
                        self.max_attempts,
                        delay.as_millis()
                    );
                    crate::metrics::record_retry(operation);
                    sleep(delay).await;
                    attempt += 1;
                },
                Err(err) => {
                    debug!("[Retry] {} giving up after {} attempt(s)", operation, attempt + 1);
                    return Err(err);
                },
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(RetryConfig::default())
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.base_delay_ms),
            Duration::from_millis(config.max_delay_ms),
        )
    }
}
