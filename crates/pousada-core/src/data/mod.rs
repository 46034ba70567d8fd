//! Adapter for backend clients that return `{ data, error }` instead of failing.
//!
//! The pair is unwrapped into a `Result` per attempt so the retry executor
//! can classify by backend error code.

mod error;
mod result;

pub use error::{classify_data_code, DataAccessError};
pub use result::{BackendError, DataResult};

use std::future::Future;

use crate::retry::{execute_with_retry, RetryOptions};

/// Run a paired-result operation with retry and return its unwrapped data.
///
/// A retryable backend code (connection class) is retried; constraint
/// violations and missing data fail after one attempt. Pass a condition via
/// [`RetryOptions::with_condition`] to use a different code vocabulary.
pub async fn data_operation_with_retry<T, F, Fut>(
    mut operation: F,
    options: &RetryOptions<DataAccessError>,
) -> Result<T, DataAccessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DataResult<T>>,
{
    execute_with_retry(
        || {
            let pending = operation();
            async move { pending.await.into_result() }
        },
        options,
    )
    .await
}
