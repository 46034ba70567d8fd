//! Data-access error type and backend code classification.

use thiserror::Error;

use crate::retry::{classify_message, Classify, RetryClass};

/// Backend codes that name a transient connection condition.
const RETRYABLE_CODES: [&str; 7] = [
    // cannot_connect_now, admin/crash shutdown
    "57P01", "57P02", "57P03",
    // too_many_connections
    "53300",
    // PostgREST: database unreachable, connection pool exhausted, schema cache loading
    "PGRST000", "PGRST001", "PGRST002",
];

/// Failure of a `{ data, error }` style backend call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataAccessError {
    /// The backend reported an error.
    #[error("{message}")]
    Backend {
        code: Option<String>,
        message: String,
    },
    /// Neither data nor error came back.
    #[error("No data returned")]
    NoData,
}

impl DataAccessError {
    pub fn code(&self) -> Option<&str> {
        match self {
            DataAccessError::Backend { code, .. } => code.as_deref(),
            DataAccessError::NoData => None,
        }
    }
}

/// Classify a backend error code.
///
/// SQLSTATE class `08` (connection exception) and the codes in
/// `RETRYABLE_CODES` are retryable; everything else, including class `23`
/// constraint violations, is terminal.
pub fn classify_data_code(code: &str) -> RetryClass {
    if code.starts_with("08") || RETRYABLE_CODES.contains(&code) {
        RetryClass::Retryable
    } else {
        RetryClass::Terminal
    }
}

impl Classify for DataAccessError {
    fn retry_class(&self) -> RetryClass {
        match self {
            DataAccessError::Backend {
                code: Some(code), ..
            } => classify_data_code(code),
            DataAccessError::Backend {
                code: None,
                message,
            } => classify_message(message),
            DataAccessError::NoData => RetryClass::Terminal,
        }
    }
}
