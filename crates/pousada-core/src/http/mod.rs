//! JSON-over-HTTP calls wrapped in the retry executor.
//!
//! Each attempt is one transport exchange. Non-2xx responses become
//! [`HttpError::Status`] so the default classifier can retry 429/5xx (or a
//! message mentioning a timeout, connection or network failure) and stop on
//! everything else.

mod error;
mod request;
mod response;
mod transport;

pub use error::HttpError;
pub use request::{FetchRequest, Method, DEFAULT_CONTENT_TYPE};
pub use response::HttpResponse;
pub use transport::{CurlTransport, HttpTransport};

use serde::de::DeserializeOwned;

use crate::retry::{execute_with_retry, RetryOptions};

/// Fetch `url` and decode its JSON body, retrying transient failures.
/// Uses the default [`CurlTransport`].
pub async fn fetch_with_retry<T: DeserializeOwned>(
    url: &str,
    request: &FetchRequest,
    options: &RetryOptions<HttpError>,
) -> Result<T, HttpError> {
    fetch_with_retry_via(&CurlTransport::default(), url, request, options).await
}

/// [`fetch_with_retry`] over an explicit transport.
pub async fn fetch_with_retry_via<T, C>(
    transport: &C,
    url: &str,
    request: &FetchRequest,
    options: &RetryOptions<HttpError>,
) -> Result<T, HttpError>
where
    T: DeserializeOwned,
    C: HttpTransport,
{
    url::Url::parse(url).map_err(|source| HttpError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let request = request.with_default_headers();
    execute_with_retry(|| fetch_once(transport, url, &request), options).await
}

async fn fetch_once<T, C>(transport: &C, url: &str, request: &FetchRequest) -> Result<T, HttpError>
where
    T: DeserializeOwned,
    C: HttpTransport,
{
    let response = transport.send(url, request).await?;
    response.into_json()
}
