//! Bounded retry around a single delivery attempt.
//!
//! A [`RetryPolicy`] wraps the provider call in a retry loop with a
//! configurable delay strategy and a predicate deciding whether a returned
//! result warrants another attempt. Delay computation is pure and testable
//! without sleeping ([`RetryPolicy::delay_for`]).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{DeliveryResult, DispatchResult};
use crate::result::NotificationResult;

/// Delay strategy between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Constant delay between attempts.
    Fixed,
    /// Delay doubles after each attempt: `initial × 2^(attempt-1)`.
    ExponentialBackoff,
}

/// Configurable retry policy for notification delivery attempts.
///
/// Create instances through the factories:
///
/// ```rust
/// use dispatchify::RetryPolicy;
/// use std::time::Duration;
///
/// RetryPolicy::none();                                          // execute exactly once
/// RetryPolicy::fixed(3, Duration::from_secs(1));                // 3 attempts, 1 s apart
/// RetryPolicy::exponential_backoff(4, Duration::from_millis(500)); // 500 ms → 1 s → 2 s
/// ```
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    strategy: Strategy,
    retry_condition: Arc<dyn Fn(&NotificationResult) -> bool + Send + Sync>,
}

impl std::fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("initial_delay", &self.initial_delay)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl RetryPolicy {
    fn new(
        max_attempts: u32,
        initial_delay: Duration,
        strategy: Strategy,
        retry_condition: Arc<dyn Fn(&NotificationResult) -> bool + Send + Sync>,
    ) -> Self {
        assert!(max_attempts >= 1, "max_attempts must be >= 1");
        Self {
            max_attempts,
            initial_delay,
            strategy,
            retry_condition,
        }
    }

    /// No retries — execute exactly once.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO, Strategy::Fixed, Arc::new(|_| false))
    }

    /// Retry up to `max_attempts` times with a constant delay between each.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::new(
            max_attempts,
            delay,
            Strategy::Fixed,
            Arc::new(|r: &NotificationResult| !r.is_successful()),
        )
    }

    /// Retry with exponential backoff (delay doubles after each attempt).
    pub fn exponential_backoff(max_attempts: u32, initial_delay: Duration) -> Self {
        Self::new(
            max_attempts,
            initial_delay,
            Strategy::ExponentialBackoff,
            Arc::new(|r: &NotificationResult| !r.is_successful()),
        )
    }

    /// Replace the predicate deciding whether a returned result warrants
    /// another attempt.
    pub fn with_retry_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&NotificationResult) -> bool + Send + Sync + 'static,
    {
        self.retry_condition = Arc::new(condition);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The delay to wait after the given attempt (1-indexed).
    ///
    /// Pure computation; no sleeping happens here.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.strategy {
            Strategy::Fixed => self.initial_delay,
            Strategy::ExponentialBackoff => {
                self.initial_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
            }
        }
    }

    /// Executes the given action, retrying according to this policy.
    ///
    /// Retries happen when the returned result matches the retry condition
    /// or when the action fails with a delivery error. When attempts are
    /// exhausted, the last unsuccessful result is returned as-is, or the
    /// last delivery error is re-raised — the two are never mixed across
    /// attempts; only the final attempt's outcome matters.
    pub async fn execute<F, Fut>(&self, mut action: F) -> DispatchResult<NotificationResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DeliveryResult>,
    {
        let mut last_result = None;
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match action().await {
                Ok(result) => {
                    last_error = None;
                    if !(self.retry_condition)(&result) {
                        return Ok(result);
                    }
                    debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        "attempt returned non-successful result, retrying"
                    );
                    last_result = Some(result);
                }
                Err(e) => {
                    debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "attempt failed with delivery error"
                    );
                    last_result = None;
                    last_error = Some(e);
                }
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.delay_for(attempt)).await;
            }
        }

        match (last_error, last_result) {
            (Some(e), _) => Err(e.into()),
            (None, Some(result)) => Ok(result),
            (None, None) => unreachable!("max_attempts >= 1 guarantees at least one attempt"),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}
