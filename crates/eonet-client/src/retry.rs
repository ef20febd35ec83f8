//! Retry policy and status classification.

use std::time::Duration;

use async_trait::async_trait;

/// Bounded retry with linear backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay unit; the wait after attempt `n` is `backoff_base * n`.
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Delay to wait after the given (1-based) failed attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }

    /// Check if another attempt is allowed after `attempt` attempts.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// How a response status affects the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Below 400: read the body.
    Success,
    /// 429 and 5xx: try again.
    Retryable,
    /// Any other status from 400 up: give up immediately.
    Fatal,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            0..=399 => StatusClass::Success,
            429 | 500..=599 => StatusClass::Retryable,
            _ => StatusClass::Fatal,
        }
    }
}

/// Waits between attempts.
///
/// The client sleeps through this trait so tests can observe backoff
/// without actually waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
