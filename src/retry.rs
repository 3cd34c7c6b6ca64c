//! Fixed-delay retry for throttled AWS calls.
//!
//! Only [`AwsError::Throttled`] is retried. Every other error is returned on
//! the attempt that produced it, and once the attempt budget is spent the
//! last error is returned unchanged.

use crate::aws::AwsError;
use backon::{ConstantBuilder, Retryable};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of attempts, including the first one
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default delay between attempts
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Attempt budget and delay for throttled calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero behaves like one.
    pub max_attempts: u32,
    /// Fixed delay before each retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    fn backoff(&self) -> ConstantBuilder {
        let retries = self.max_attempts.saturating_sub(1) as usize;
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(retries)
    }
}

/// Run `operation`, retrying it while it fails with a throttling error.
///
/// `what` names the call in log output (e.g. "delete security group").
pub async fn retry_on_throttle<T, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    operation: F,
) -> Result<T, AwsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AwsError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    operation
        .retry(policy.backoff())
        .when(AwsError::is_throttling)
        .notify(|e, delay| {
            warn!(
                operation = %what,
                attempt,
                max_attempts,
                delay = ?delay,
                error = %e,
                "Throttled, retrying"
            );
            attempt += 1;
        })
        .await
}
