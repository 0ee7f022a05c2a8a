//! Per-attempt request timeout.
//!
//! Expiry drops the wrapped future. For a reqwest send that closes the
//! connection, so a timed-out request does not keep running in the background.

use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub async fn with_timeout<T, F>(future: F, timeout: Duration) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout {
            ms: timeout.as_millis() as u64,
        }),
    }
}
