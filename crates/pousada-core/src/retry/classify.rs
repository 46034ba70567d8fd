//! Classify errors into retryable and terminal failures.

use std::io;

use crate::data::DataAccessError;
use crate::http::HttpError;
use crate::retry::policy::RetryClass;

/// Statuses that signal a transient server or rate-limit condition.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Message fragments (lowercase) that mark a connection or timeout failure.
const TRANSIENT_VOCABULARY: [&str; 3] = ["timeout", "connection", "network"];

/// Errors the default retry condition knows how to judge.
///
/// Implementations must be pure: the same error always yields the same class.
pub trait Classify {
    fn retry_class(&self) -> RetryClass;
}

/// An error tagged with its classifier verdict. The error itself is unchanged.
#[derive(Debug)]
pub enum ClassifiedError<E> {
    Retryable(E),
    Terminal(E),
}

impl<E> ClassifiedError<E> {
    pub fn class(&self) -> RetryClass {
        match self {
            ClassifiedError::Retryable(_) => RetryClass::Retryable,
            ClassifiedError::Terminal(_) => RetryClass::Terminal,
        }
    }

    pub fn into_inner(self) -> E {
        match self {
            ClassifiedError::Retryable(e) | ClassifiedError::Terminal(e) => e,
        }
    }
}

/// Run the default classifier over an error.
pub fn classify<E: Classify>(error: E) -> ClassifiedError<E> {
    match error.retry_class() {
        RetryClass::Retryable => ClassifiedError::Retryable(error),
        RetryClass::Terminal => ClassifiedError::Terminal(error),
    }
}

/// Classify an HTTP status code.
pub fn classify_http_status(status: u16) -> RetryClass {
    if RETRYABLE_STATUSES.contains(&status) {
        RetryClass::Retryable
    } else {
        RetryClass::Terminal
    }
}

/// Classify by message text: timeout/connection/network wording is retryable.
pub fn classify_message(message: &str) -> RetryClass {
    let lower = message.to_lowercase();
    if TRANSIENT_VOCABULARY.iter().any(|w| lower.contains(w)) {
        RetryClass::Retryable
    } else {
        RetryClass::Terminal
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> RetryClass {
    if e.is_operation_timedout()
        || e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return RetryClass::Retryable;
    }
    classify_message(e.description())
}

impl Classify for io::Error {
    fn retry_class(&self) -> RetryClass {
        match self.kind() {
            io::ErrorKind::TimedOut
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe => RetryClass::Retryable,
            _ => classify_message(&self.to_string()),
        }
    }
}

/// Walks the error chain for a known error type before falling back to the
/// message vocabulary.
impl Classify for anyhow::Error {
    fn retry_class(&self) -> RetryClass {
        for cause in self.chain() {
            if let Some(e) = cause.downcast_ref::<HttpError>() {
                return e.retry_class();
            }
            if let Some(e) = cause.downcast_ref::<DataAccessError>() {
                return e.retry_class();
            }
            if let Some(e) = cause.downcast_ref::<io::Error>() {
                return e.retry_class();
            }
        }
        classify_message(&format!("{:#}", self))
    }
}
