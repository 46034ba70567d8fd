//! Retry and backoff policy.
//!
//! This module encapsulates failure classification (transient server and
//! network errors versus client and constraint errors) and capped exponential
//! backoff so that the HTTP and data-access adapters share one policy.

mod classify;
mod options;
mod policy;
mod run;

pub use classify::{
    classify, classify_curl_error, classify_http_status, classify_message, Classify,
    ClassifiedError, RETRYABLE_STATUSES,
};
pub use options::{OnRetry, RetryCondition, RetryOptions};
pub use policy::{Attempt, PolicyError, RetryClass, RetryDecision, RetryPolicy};
pub use run::{execute_with_retry, with_retry};
