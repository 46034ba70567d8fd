//! Retry loop: run an async operation until success or the policy says stop.

use std::fmt;
use std::future::Future;

use super::classify::Classify;
use super::options::RetryOptions;
use super::policy::{Attempt, RetryClass, RetryDecision};

/// Runs `operation` until it succeeds or the retry policy says to stop.
///
/// On a retryable failure with retries left, calls the `on_retry` hook,
/// sleeps for the backoff delay, then tries again. The error returned is
/// always the one the operation itself produced (the last one on exhaustion).
pub async fn execute_with_retry<T, E, F, Fut>(
    mut operation: F,
    options: &RetryOptions<E>,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let policy = &options.policy;
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let class = options.class_of(&e);
                match policy.decide(attempt, class) {
                    RetryDecision::NoRetry => {
                        if class == RetryClass::Retryable {
                            tracing::warn!(attempts = attempt, error = %e, "retries exhausted");
                        }
                        return Err(e);
                    }
                    RetryDecision::RetryAfter(delay) => {
                        let next = Attempt {
                            index: attempt,
                            delay,
                        };
                        tracing::debug!(
                            next_attempt = next.index,
                            delay_ms = next.delay.as_millis() as u64,
                            error = %e,
                            "transient failure, retrying"
                        );
                        options.notify_retry(&e, attempt);
                        tokio::time::sleep(next.delay).await;
                        attempt += 1;
                    }
                }
            }
        }
    }
}

/// [`execute_with_retry`] with the default policy and classifier.
pub async fn with_retry<T, E, F, Fut>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Classify + fmt::Display,
{
    execute_with_retry(operation, &RetryOptions::default()).await
}
