//! Retry with exponential backoff for storefront page fetches.
//!
//! Every failure counts as a failed attempt and is retried, including
//! timeouts and non-2xx statuses such as 404.

use std::error::Error as _;
use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Delay before the attempt that follows failed attempt number `attempt`
/// (1-based): `backoff_base_ms * 2^attempt`.
fn backoff_delay(backoff_base_ms: u64, attempt: u32) -> Duration {
    Duration::from_millis(backoff_base_ms.saturating_mul(1u64 << attempt.min(62)))
}

/// Renders `err` with every underlying cause, so a wrapped reqwest error
/// still says what went wrong on the wire.
fn describe(err: &ScraperError) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    if matches!(err, ScraperError::Http(e) if e.is_timeout()) && !message.contains("timed out") {
        message.push_str(" (timed out)");
    }
    message
}

/// Runs `operation` up to `max_attempts` times in total.
///
/// # Backoff schedule (`backoff_base_ms = 1000`)
///
/// | Failed attempt | Sleep before next attempt |
/// |----------------|---------------------------|
/// | 1              | 1000 ms × 2¹ = 2 s        |
/// | 2              | 1000 ms × 2² = 4 s        |
/// | 3              | 1000 ms × 2³ = 8 s        |
///
/// No sleep follows the final attempt. `max_attempts = 0` is treated as 1.
///
/// # Errors
///
/// Returns [`ScraperError::FetchFailed`] carrying `url` and the message of
/// the last underlying error, causes included, once every attempt has failed.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    url: &str,
    max_attempts: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let error = describe(&err);
                tracing::warn!(url, attempt, max_attempts, error = %error, "fetch attempt failed");
                if attempt >= max_attempts {
                    return Err(ScraperError::FetchFailed {
                        url: url.to_owned(),
                        attempts: attempt,
                        last_error: error,
                    });
                }
            }
        }

        tokio::time::sleep(backoff_delay(backoff_base_ms, attempt)).await;
        attempt += 1;
    }
}
