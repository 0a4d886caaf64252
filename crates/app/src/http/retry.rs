//! Retry loop for idempotent requests.

use std::future::Future;

use tracing::warn;

use crate::{config::RetryPolicy, http::ApiError};

/// Run `request` until it succeeds, fails with a non-retryable error, or the
/// policy runs out of attempts.
///
/// # Errors
///
/// Returns the error of the last attempt.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut request: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match request().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                warn!(%error, attempt, max_attempts, "request failed, retrying");

                tokio::time::sleep(policy.backoff).await;

                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
