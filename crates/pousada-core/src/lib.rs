//! Retry-with-backoff execution for the pousada site's outbound calls.
//!
//! [`retry`] holds the policy, classifier and executor loop; [`http`] and
//! [`data`] adapt fetch-style and `{ data, error }`-style calls onto it.

pub mod config;
pub mod data;
pub mod executor;
pub mod http;
pub mod logging;
pub mod retry;

pub use data::data_operation_with_retry;
pub use executor::RetryExecutor;
pub use http::fetch_with_retry;
pub use retry::{execute_with_retry, with_retry};
