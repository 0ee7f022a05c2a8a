//! Retry with exponential backoff.
//!
//! An operation is attempted up to `max_retries + 1` times. 4xx failures are
//! returned immediately; anything else is retried after `base * 2^n`, where
//! `n` is the zero-based index of the attempt that just failed.

use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// No retries at all.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Backoff after the failed attempt `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    pub fn should_retry(&self, attempt: u32, error: &ApiError) -> bool {
        attempt < self.max_retries && error.is_transient()
    }
}

/// Run `operation` under `policy`, returning the first success or the last
/// error once the budget is spent.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if policy.should_retry(attempt, &e) => {
                let delay = policy.delay_for(attempt);
                tracing::debug!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use tokio::time::Instant;

    use super::*;

    fn server_error() -> ApiError {
        ApiError::Http {
            status: 500,
            message: "HTTP 500: Internal Server Error".to_string(),
        }
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(4_000));
    }

    #[test]
    fn huge_attempt_counts_saturate_instead_of_overflowing() {
        let policy = RetryPolicy::default();
        assert!(policy.delay_for(64) >= policy.delay_for(31));
    }

    #[tokio::test(start_paused = true)]
    async fn client_error_is_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry(&RetryPolicy::default(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Http {
                status: 404,
                message: "Provider not found".to_string(),
            })
        })
        .await;

        assert_eq!(result.unwrap_err().status(), Some(404));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn undecodable_body_is_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry(&RetryPolicy::default(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Deserialization("missing field `bookingId`".to_string()))
        })
        .await;

        assert!(matches!(result, Err(ApiError::Deserialization(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_exhausts_budget_with_exponential_delays() {
        let start = Instant::now();
        let log = Mutex::new(Vec::new());
        let attempts_at = &log;
        let policy = RetryPolicy::new(3, Duration::from_millis(1_000));

        let result: Result<(), _> = with_retry(&policy, move || async move {
            attempts_at.lock().unwrap().push(start.elapsed());
            Err(server_error())
        })
        .await;

        assert_eq!(result.unwrap_err().status(), Some(500));
        let attempts_at = log.into_inner().unwrap();
        assert_eq!(
            attempts_at,
            vec![
                Duration::ZERO,
                Duration::from_millis(1_000),
                Duration::from_millis(3_000),
                Duration::from_millis(7_000),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_then_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retry(&RetryPolicy::default(), move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(ApiError::Network("connection reset".to_string()))
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_single_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = with_retry(&RetryPolicy::none(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Timeout { ms: 10 })
        })
        .await;

        assert!(result.unwrap_err().is_timeout());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
