//! Retry policy and wrapper
//!
//! Every remote call in the pipeline goes through [`retry`] with an explicit
//! [`RetryPolicy`] value: bounded attempts, a delay shape, and a per-attempt
//! timeout. Malformed-data failures never enter this wrapper; only I/O is
//! worth retrying.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::debug;

/// Default per-attempt timeout
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay shape between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay before every retry
    Fixed,
    /// Delay doubles each retry (capped at 64x base)
    Exponential,
}

/// Retry policy for one class of operation
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retry attempts after the first failure
    pub max_retries: u32,
    /// Base delay between attempts
    pub base_delay: Duration,
    /// Delay shape
    pub backoff: Backoff,
    /// Per-attempt timeout; exceeding it counts as a transient failure
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    /// Fixed-delay policy
    pub fn fixed(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            backoff: Backoff::Fixed,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Exponential-backoff policy
    pub fn exponential(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            backoff: Backoff::Exponential,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Override the per-attempt timeout
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.base_delay,
            Backoff::Exponential => self.base_delay * (1u32 << attempt.min(6)),
        }
    }
}

/// All attempts failed
#[derive(Debug, Clone, Error)]
#[error("{operation} failed after {attempts} attempts: {last_error}")]
pub struct RetryExhausted {
    /// Operation name, for logs and reports
    pub operation: &'static str,
    /// Total attempts made
    pub attempts: u32,
    /// Message from the final failure
    pub last_error: String,
}

/// Execute an operation under a retry policy
///
/// Each attempt runs under the policy's timeout; a timeout counts as a
/// transient failure. Returns the first success, or [`RetryExhausted`] once
/// the budget is spent.
pub async fn retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut last_error = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = policy.delay(attempt - 1);
            debug!(
                operation,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying after delay"
            );
            tokio::time::sleep(delay).await;
        }

        match timeout(policy.attempt_timeout, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => {
                if attempt < policy.max_retries {
                    debug!(operation, attempt, error = %e, "attempt failed, will retry");
                }
                last_error = Some(e.to_string());
            }
            Err(_) => {
                if attempt < policy.max_retries {
                    debug!(
                        operation,
                        attempt,
                        timeout_ms = policy.attempt_timeout.as_millis() as u64,
                        "attempt timed out, will retry"
                    );
                }
                last_error = Some("operation timed out".to_string());
            }
        }
    }

    Err(RetryExhausted {
        operation,
        attempts: policy.max_retries + 1,
        last_error: last_error.unwrap_or_else(|| "unknown error".to_string()),
    })
}

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;
