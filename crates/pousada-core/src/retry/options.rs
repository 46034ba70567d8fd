//! Per-call retry options: policy plus the optional condition and callback.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::classify::Classify;
use super::policy::{RetryClass, RetryPolicy};

/// Caller-supplied retry predicate; replaces the default classifier.
pub type RetryCondition<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// Called before each backoff sleep with the error and the 1-based retry number.
pub type OnRetry<E> = Arc<dyn Fn(&E, u32) + Send + Sync>;

/// Everything one retried call needs. Immutable once built; cheap to clone.
///
/// [`RetryOptions::new`] uses the error's [`Classify`] impl. Error types
/// without one go through [`RetryOptions::custom`] and supply the condition.
pub struct RetryOptions<E> {
    pub policy: RetryPolicy,
    classifier: fn(&E) -> RetryClass,
    retry_condition: Option<RetryCondition<E>>,
    on_retry: Option<OnRetry<E>>,
}

fn never_retry<E>(_: &E) -> RetryClass {
    RetryClass::Terminal
}

impl<E: Classify> RetryOptions<E> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            classifier: E::retry_class,
            retry_condition: None,
            on_retry: None,
        }
    }
}

impl<E> RetryOptions<E> {
    /// Options whose retryability is decided by `condition` alone.
    pub fn custom<F>(policy: RetryPolicy, condition: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Self {
            policy,
            classifier: never_retry::<E>,
            retry_condition: Some(Arc::new(condition)),
            on_retry: None,
        }
    }

    /// Decide retryability with `condition` instead of the default classifier.
    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.retry_condition = Some(Arc::new(condition));
        self
    }

    pub fn on_retry<F>(mut self, callback: F) -> Self
    where
        F: Fn(&E, u32) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(callback));
        self
    }

    /// Classify one failed attempt's error.
    pub(crate) fn class_of(&self, error: &E) -> RetryClass {
        match &self.retry_condition {
            Some(condition) if condition(error) => RetryClass::Retryable,
            Some(_) => RetryClass::Terminal,
            None => (self.classifier)(error),
        }
    }

    /// Invoke the on-retry hook. A panicking hook is logged and ignored.
    pub(crate) fn notify_retry(&self, error: &E, attempt: u32) {
        let Some(callback) = &self.on_retry else {
            return;
        };
        if panic::catch_unwind(AssertUnwindSafe(|| callback(error, attempt))).is_err() {
            tracing::warn!(attempt, "on_retry callback panicked; continuing retries");
        }
    }
}

impl<E: Classify> Default for RetryOptions<E> {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl<E> Clone for RetryOptions<E> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy.clone(),
            classifier: self.classifier,
            retry_condition: self.retry_condition.clone(),
            on_retry: self.on_retry.clone(),
        }
    }
}

impl<E: Classify> From<RetryPolicy> for RetryOptions<E> {
    fn from(policy: RetryPolicy) -> Self {
        Self::new(policy)
    }
}

impl<E> fmt::Debug for RetryOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("policy", &self.policy)
            .field("retry_condition", &self.retry_condition.is_some())
            .field("on_retry", &self.on_retry.is_some())
            .finish()
    }
}
