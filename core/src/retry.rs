//! Bounded, fixed-delay retry.
//!
//! # Design
//! `retry` drives any fallible async operation: run it, and on a retryable
//! failure sleep for the policy's delay and run it again, until it succeeds
//! or the attempt budget is spent. Exactly one attempt is in flight at a
//! time. The delay is the same between every pair of attempts. Only the last
//! error survives; earlier ones are logged and dropped.

use std::future::Future;
use std::time::Duration;

use crate::error::{FetchError, Result};

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How many times to try, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// A policy making at most `attempts` tries, one second apart.
    ///
    /// `attempts` counts the first try, so `1` means no retries. Zero is
    /// rejected with `FetchError::InvalidAttempts`.
    pub fn new(attempts: u32) -> Result<Self> {
        if attempts == 0 {
            return Err(FetchError::InvalidAttempts(attempts));
        }
        Ok(Self {
            attempts,
            delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// A single attempt and no retries.
    pub fn once() -> Self {
        Self {
            attempts: 1,
            delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Run `operation` under `policy`.
///
/// Non-retryable errors (see `FetchError::is_retryable`) are returned at once
/// without consuming the rest of the budget.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 1;
    loop {
        let err = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let remaining = policy.attempts - attempt;
        if remaining == 0 || !err.is_retryable() {
            if remaining == 0 && policy.attempts > 1 {
                tracing::error!(attempts = policy.attempts, error = %err, "giving up");
            }
            return Err(err);
        }

        tracing::warn!(
            attempt,
            remaining,
            delay_ms = policy.delay.as_millis() as u64,
            error = %err,
            "attempt failed, retrying"
        );
        tokio::time::sleep(policy.delay).await;
        attempt += 1;
    }
}
