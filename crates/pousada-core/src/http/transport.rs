//! Transports that perform a single HTTP exchange.
//!
//! The production transport uses the curl crate (libcurl) on the blocking
//! pool; tests substitute scripted transports.

use std::future::Future;
use std::str;
use std::time::Duration;

use crate::config::HttpConfig;

use super::error::HttpError;
use super::request::{FetchRequest, Method};
use super::response::{self, HttpResponse};

/// One request, one response. No retrying happens at this layer.
pub trait HttpTransport: Send + Sync {
    fn send(
        &self,
        url: &str,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// libcurl `Easy` transfer run inside `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl CurlTransport {
    pub fn new(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }

    /// Performs the request in the current thread.
    fn perform(&self, url: &str, request: &FetchRequest) -> Result<HttpResponse, HttpError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post => easy.post_fields_copy(request.body.as_deref().unwrap_or_default())?,
            Method::Put | Method::Patch | Method::Delete => {
                easy.custom_request(request.method.as_str())?;
                if let Some(payload) = &request.body {
                    easy.post_fields_copy(payload)?;
                }
            }
        }

        let mut list = curl::easy::List::new();
        for (name, value) in &request.headers {
            list.append(&format!("{}: {}", name.trim(), value.trim()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        tracing::trace!(url, method = %request.method, status = code, "http exchange");
        Ok(HttpResponse {
            status: u16::try_from(code).unwrap_or(u16::MAX),
            status_text: response::status_text(&header_lines),
            body,
        })
    }
}

impl HttpTransport for CurlTransport {
    async fn send(&self, url: &str, request: &FetchRequest) -> Result<HttpResponse, HttpError> {
        let this = self.clone();
        let url = url.to_string();
        let request = request.clone();
        tokio::task::spawn_blocking(move || this.perform(&url, &request))
            .await
            .map_err(|e| HttpError::Worker(e.to_string()))?
    }
}
