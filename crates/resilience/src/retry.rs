// crates/resilience/src/retry.rs
//! Retry policy and async executor

use crate::error::RetryError;
use std::future::Future;
use std::time::Duration;

/// Retry policy configuration
///
/// Constructed explicitly and injected into callers; there is no process-wide
/// shared policy. The default budget is 3 attempts with no inter-attempt
/// delay, matching the storefront's observed stale-session failure mode where
/// an immediate identical retry succeeds. Bounded backoff can be enabled with
/// [`RetryPolicy::with_initial_delay`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first attempt)
    max_attempts: usize,
    /// Delay before the first retry; zero means retry immediately
    initial_delay: Duration,
    /// Cap applied to the growing delay
    max_delay: Duration,
    /// Backoff multiplier applied per retry
    multiplier: f64,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and no delay
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: Duration::ZERO,
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }

    /// Sets the delay before the first retry, enabling backoff
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between attempts
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Returns the maximum number of attempts
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Calculates the delay to wait before the given retry (1-based)
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 || self.initial_delay.is_zero() {
            return Duration::ZERO;
        }

        let base = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32 - 1);
        let capped = base.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Executes an async operation under a retry policy
///
/// Attempts run strictly sequentially; attempt N+1 only starts after attempt
/// N's failure is observed. Every error kind is retried, including validation
/// aggregates. When the budget is exhausted the final attempt's error is
/// surfaced inside [`RetryError::Exhausted`] - there is no partial success.
/// Cancellation is cooperative: dropping the returned future abandons the
/// operation between awaits.
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt >= policy.max_attempts() {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        source: e,
                    });
                }

                let delay = policy.delay_for_attempt(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
