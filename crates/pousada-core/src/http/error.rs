//! HTTP adapter error type.

use thiserror::Error;

use crate::retry::{
    classify_curl_error, classify_http_status, classify_message, Classify, RetryClass,
};

/// Failure of a single `fetch_with_retry` attempt.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Server answered with a non-2xx status. `message` comes from the JSON
    /// body's `error.message` or falls back to `HTTP <status>: <statusText>`.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The URL could not be parsed; nothing was sent.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// libcurl failed before a response arrived (timeout, DNS, refused...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// 2xx response whose body is not the expected JSON.
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The blocking worker running the transfer died.
    #[error("HTTP worker failed: {0}")]
    Worker(String),
}

impl HttpError {
    /// HTTP status attached to the failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Classify for HttpError {
    fn retry_class(&self) -> RetryClass {
        match self {
            HttpError::Status { status, message } => match classify_http_status(*status) {
                RetryClass::Retryable => RetryClass::Retryable,
                RetryClass::Terminal => classify_message(message),
            },
            HttpError::Transport(e) => classify_curl_error(e),
            HttpError::InvalidUrl { .. } | HttpError::Decode(_) | HttpError::Worker(_) => {
                RetryClass::Terminal
            }
        }
    }
}
