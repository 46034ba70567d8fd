//! A shared, immutable retry configuration for call sites that should all
//! behave the same way.
//!
//! There is no global instance: build one `RetryExecutor` (usually from the
//! loaded config) and clone it where needed. It holds no mutable state.

use std::fmt;
use std::future::Future;

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::config::PousadaConfig;
use crate::data::{data_operation_with_retry, DataAccessError, DataResult};
use crate::http::{fetch_with_retry_via, CurlTransport, FetchRequest, HttpError, HttpTransport};
use crate::retry::{execute_with_retry, Classify, RetryOptions, RetryPolicy};

#[derive(Debug, Clone)]
pub struct RetryExecutor<C = CurlTransport> {
    policy: RetryPolicy,
    transport: C,
}

impl Default for RetryExecutor<CurlTransport> {
    fn default() -> Self {
        Self::with_transport(RetryPolicy::default(), CurlTransport::default())
    }
}

impl RetryExecutor<CurlTransport> {
    /// Executor using the `[retry]` and `[http]` sections of the config.
    pub fn from_config(cfg: &PousadaConfig) -> Result<Self> {
        Ok(Self::with_transport(
            cfg.retry_policy()?,
            CurlTransport::new(&cfg.http),
        ))
    }
}

impl<C: HttpTransport> RetryExecutor<C> {
    pub fn with_transport(policy: RetryPolicy, transport: C) -> Self {
        Self { policy, transport }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fresh options carrying this executor's policy, for per-call tweaks.
    pub fn options<E: Classify>(&self) -> RetryOptions<E> {
        RetryOptions::new(self.policy.clone())
    }

    /// Run `operation` under this executor's policy with a caller-supplied
    /// retry condition. The error type needs no [`Classify`] impl.
    pub async fn run_when<T, E, F, Fut, P>(&self, operation: F, condition: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        P: Fn(&E) -> bool + Send + Sync + 'static,
    {
        let options = RetryOptions::custom(self.policy.clone(), condition);
        execute_with_retry(operation, &options).await
    }

    pub async fn run<T, E, F, Fut>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + fmt::Display,
    {
        execute_with_retry(operation, &self.options()).await
    }

    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        request: &FetchRequest,
    ) -> Result<T, HttpError> {
        fetch_with_retry_via(&self.transport, url, request, &self.options()).await
    }

    pub async fn data_operation<T, F, Fut>(&self, operation: F) -> Result<T, DataAccessError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DataResult<T>>,
    {
        data_operation_with_retry(operation, &self.options()).await
    }
}
