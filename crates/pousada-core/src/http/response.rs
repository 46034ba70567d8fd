//! Raw HTTP response and its JSON interpretation.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::HttpError;

/// Status, reason phrase and body as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase from the status line; empty for HTTP/2.
    pub status_text: String,
    pub body: Vec<u8>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable failure message for a non-2xx response.
    pub fn error_message(&self) -> String {
        serde_json::from_slice::<ErrorEnvelope>(&self.body)
            .ok()
            .and_then(|env| env.error)
            .and_then(|detail| detail.message)
            .unwrap_or_else(|| format!("HTTP {}: {}", self.status, self.status_text))
    }

    /// Turn a 2xx response into its decoded JSON body, anything else into
    /// an [`HttpError::Status`].
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        if !self.is_success() {
            return Err(HttpError::Status {
                status: self.status,
                message: self.error_message(),
            });
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Reason phrase from the last `HTTP/...` status line among collected header lines.
pub(crate) fn status_text(lines: &[String]) -> String {
    lines
        .iter()
        .rev()
        .map(|l| l.trim())
        .find(|l| l.starts_with("HTTP/"))
        .map(|l| {
            l.splitn(3, ' ')
                .nth(2)
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        })
        .unwrap_or_default()
}
