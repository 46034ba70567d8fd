use std::time::Duration;

use thiserror::Error;

/// Verdict of the failure classifier for a single error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Transient failure: worth another attempt after a backoff delay.
    Retryable,
    /// Retrying will not help (client error, constraint violation, bad input).
    Terminal,
}

impl RetryClass {
    pub fn is_retryable(self) -> bool {
        matches!(self, RetryClass::Retryable)
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// One scheduled invocation of the wrapped operation.
///
/// `index` is 0-based (0 = first try); `delay` is the wait before this
/// invocation starts, zero for the first try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub index: u32,
    pub delay: Duration,
}

/// Rejected policy parameters.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("base delay must be greater than zero")]
    ZeroBaseDelay,
    #[error("max delay ({max:?}) is smaller than base delay ({base:?})")]
    MaxBelowBase { base: Duration, max: Duration },
    #[error("backoff factor must be a finite number >= 1 (got {0})")]
    BadBackoffFactor(f64),
}

/// Exponential backoff policy with a cap.
///
/// The delay before retry `n` (n >= 1) is
/// `min(base_delay * backoff_factor^(n-1), max_delay)`. At most
/// `max_retries + 1` invocations are made.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 = single attempt).
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
    /// Multiplier applied after each failed retry.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10_000),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = backoff_factor;
        self
    }

    /// Check the parameter invariants.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.base_delay.is_zero() {
            return Err(PolicyError::ZeroBaseDelay);
        }
        if self.max_delay < self.base_delay {
            return Err(PolicyError::MaxBelowBase {
                base: self.base_delay,
                max: self.max_delay,
            });
        }
        if !self.backoff_factor.is_finite() || self.backoff_factor < 1.0 {
            return Err(PolicyError::BadBackoffFactor(self.backoff_factor));
        }
        Ok(())
    }

    /// Backoff delay before retry `attempt` (1-based), capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let raw_nanos = self.base_delay.as_nanos() as f64 * self.backoff_factor.powi(exp);
        let max_nanos = self.max_delay.as_nanos() as f64;
        if !raw_nanos.is_finite() || raw_nanos >= max_nanos {
            return self.max_delay;
        }
        Duration::from_nanos(raw_nanos.round() as u64)
    }

    /// Decide what to do after failed attempt number `attempt` (1-based).
    pub fn decide(&self, attempt: u32, class: RetryClass) -> RetryDecision {
        if class == RetryClass::Terminal || attempt > self.max_retries {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay_for(attempt))
    }

    /// Every invocation this policy allows, in order, with the wait before each.
    pub fn schedule(&self) -> Vec<Attempt> {
        let first = Attempt {
            index: 0,
            delay: Duration::ZERO,
        };
        std::iter::once(first)
            .chain((1..=self.max_retries).map(|index| Attempt {
                index,
                delay: self.delay_for(index),
            }))
            .collect()
    }
}
