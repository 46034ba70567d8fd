use serde::{Deserialize, Serialize};

use super::error::DataAccessError;

/// Error object as returned by PostgREST-style backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl BackendError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
            details: None,
            hint: None,
        }
    }
}

/// The `{ data, error }` pair a backend client hands back instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataResult<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<BackendError>,
}

impl<T> DataResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: BackendError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    /// Unwrap the pair. An error wins over data; no data and no error is
    /// [`DataAccessError::NoData`].
    pub fn into_result(self) -> Result<T, DataAccessError> {
        if let Some(e) = self.error {
            return Err(DataAccessError::Backend {
                code: e.code,
                message: e.message,
            });
        }
        self.data.ok_or(DataAccessError::NoData)
    }
}
