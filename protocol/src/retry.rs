//! # Retry Executor
//!
//! Bounded retry with a constant delay, for wrapping flaky upstream calls
//! (public liteserver and HTTP API endpoints drop requests under load).
//!
//! ## Semantics
//!
//! 1. The operation runs up to `max_attempts` times, strictly one after
//!    another. A new attempt starts only after the previous one resolved.
//! 2. The first `Ok` is returned immediately.
//! 3. Between failed attempts the task sleeps for `delay` via
//!    `tokio::time::sleep`, yielding to the scheduler. Nothing spins.
//! 4. When the last attempt fails, its error is returned unchanged. Earlier
//!    errors are logged and dropped, never aggregated.
//!
//! The delay is constant. There is no exponential growth and no jitter.
//!
//! There is no cancellation either: an attempt in flight always runs to
//! completion. Callers that need a deadline should race the whole call
//! against `tokio::time::timeout`.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::config::{DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY};

// ---------------------------------------------------------------------------
// RetryPolicy
// ---------------------------------------------------------------------------

/// How many times to try, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. `0` behaves like `1`.
    pub max_attempts: u32,

    /// Fixed pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Runs `operation` under this policy. See [`with_retry`].
    pub async fn run<T, E, F, Fut>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Debug,
    {
        with_retry(operation, self.max_attempts, self.delay).await
    }
}

// ---------------------------------------------------------------------------
// with_retry
// ---------------------------------------------------------------------------

/// Runs `operation` until it succeeds or `max_attempts` attempts have failed.
///
/// Returns the first success, or the error of the final attempt.
///
/// ```
/// use std::time::Duration;
/// use ton_txfields::retry::with_retry;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut calls = 0;
/// let result: Result<u32, String> = with_retry(
///     || {
///         calls += 1;
///         let n = calls;
///         async move { if n < 2 { Err("busy".to_string()) } else { Ok(n) } }
///     },
///     3,
///     Duration::from_millis(1),
/// )
/// .await;
/// assert_eq!(result, Ok(2));
/// # }
/// ```
pub async fn with_retry<T, E, F, Fut>(
    mut operation: F,
    max_attempts: u32,
    delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if attempt >= max_attempts => {
                error!(attempts = attempt, error = ?e, "operation failed, giving up");
                return Err(e);
            }
            Err(e) => {
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = ?e,
                    "operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// [`with_retry`] with the default policy: 3 attempts, 1 s apart.
pub async fn with_default_retry<T, E, F, Fut>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Debug,
{
    RetryPolicy::default().run(operation).await
}
