//! `pousada fetch <url>` – one JSON call through the retry executor.

use anyhow::{Context, Result};
use pousada_core::config::PousadaConfig;
use pousada_core::http::{fetch_with_retry_via, CurlTransport, FetchRequest, HttpError, Method};
use pousada_core::retry::{RetryOptions, RetryPolicy};
use serde_json::Value;

/// Build the request from CLI arguments.
pub(crate) fn build_request(
    method: Method,
    headers: Vec<(String, String)>,
    data: Option<&str>,
) -> Result<FetchRequest> {
    let mut request = FetchRequest::new(method);
    for (name, value) in headers {
        request = request.header(name, value);
    }
    if let Some(raw) = data {
        let body: Value = serde_json::from_str(raw).context("--data is not valid JSON")?;
        request = request.body(body.to_string());
    }
    Ok(request)
}

pub async fn run_fetch(
    cfg: &PousadaConfig,
    policy: RetryPolicy,
    url: &str,
    method: Method,
    headers: Vec<(String, String)>,
    data: Option<&str>,
) -> Result<()> {
    let request = build_request(method, headers, data)?;
    let transport = CurlTransport::new(&cfg.http);
    let options = RetryOptions::new(policy).on_retry(|e: &HttpError, attempt| {
        eprintln!("attempt {} failed: {}; retrying", attempt, e);
    });

    let body: Value = fetch_with_retry_via(&transport, url, &request, &options)
        .await
        .with_context(|| format!("{} {}", method, url))?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
