//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failed upstream call may be retried
//! - Re-run the call with exponential backoff + jitter
//! - Enforce a total elapsed-time budget across all attempts, including
//!   the time spent inside each attempt
//!
//! # Design Decisions
//! - Upstream calls are GETs, so every transport/status failure is retryable
//! - A sleep that would overrun the budget is never started; the last error
//!   is returned as-is

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::RetryConfig;
use crate::resilience::backoff::calculate_backoff;

/// Errors that know whether another attempt could succeed.
pub trait Retryable: Sized {
    fn is_retryable(&self) -> bool;

    /// Error for a call whose first attempt was still running when the
    /// budget ran out.
    fn deadline_exceeded(route: &'static str, budget: Duration) -> Self;
}

/// Backoff policy for a single logical upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_elapsed: Duration,
}

impl RetryPolicy {
    /// Delay to sleep after `attempt` failures, or `None` once sleeping would
    /// exceed the elapsed budget.
    pub fn next_delay(&self, attempt: u32, elapsed: Duration) -> Option<Duration> {
        let delay = calculate_backoff(
            attempt,
            self.base_delay.as_millis() as u64,
            self.max_delay.as_millis() as u64,
        );
        if elapsed.saturating_add(delay) > self.max_elapsed {
            None
        } else {
            Some(delay)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            max_elapsed: Duration::from_millis(config.max_elapsed_ms),
        }
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// policy's elapsed budget runs out.
///
/// `label` names the call in logs and metrics.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &'static str,
    mut op: F,
) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let started = Instant::now();
    let mut attempts = 0u32;
    let mut last_err: Option<E> = None;

    loop {
        attempts += 1;
        let remaining = policy.max_elapsed.saturating_sub(started.elapsed());
        let err = match tokio::time::timeout(remaining, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e,
            Err(_) => {
                tracing::warn!(route = label, attempts, budget = ?policy.max_elapsed, "Upstream attempt overran retry budget");
                return Err(last_err.unwrap_or_else(|| E::deadline_exceeded(label, policy.max_elapsed)));
            }
        };

        if !err.is_retryable() {
            tracing::debug!(route = label, attempt = attempts, error = %err, "Non-retryable upstream error");
            return Err(err);
        }

        match policy.next_delay(attempts, started.elapsed()) {
            Some(delay) => {
                tracing::info!(route = label, attempt = attempts, delay = ?delay, error = %err, "Retrying upstream request");
                metrics::counter!("hub_upstream_retries_total", "route" => label).increment(1);
                last_err = Some(err);
                tokio::time::sleep(delay).await;
            }
            None => {
                tracing::warn!(
                    route = label,
                    attempts,
                    elapsed = ?started.elapsed(),
                    error = %err,
                    "Retry budget exhausted"
                );
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum Flaky {
        Transient,
        Fatal,
        TimedOut(&'static str),
    }

    impl Retryable for Flaky {
        fn is_retryable(&self) -> bool {
            matches!(self, Flaky::Transient)
        }

        fn deadline_exceeded(route: &'static str, _budget: Duration) -> Self {
            Flaky::TimedOut(route)
        }
    }

    impl std::fmt::Display for Flaky {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(2000),
            max_elapsed: Duration::from_secs(5),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<u32, Flaky> = retry_with_backoff(&fast_policy(), "test", move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 3 { Err(Flaky::Transient) } else { Ok(n) }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_within_budget() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let started = Instant::now();
        let result: Result<(), Flaky> = retry_with_backoff(&fast_policy(), "test", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Flaky::Transient)
        })
        .await;

        assert!(result.is_err());
        assert!(started.elapsed() <= Duration::from_secs(5));
        // 100 + 200 + 400 + 800 + 1600 = 3100ms; the next 2000ms sleep would overrun.
        let n = calls.load(Ordering::SeqCst);
        assert!(n >= 5 && n <= 7, "unexpected attempt count {}", n);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_immediately() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), Flaky> = retry_with_backoff(&fast_policy(), "test", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(Flaky::Fatal)
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_attempt_cut_off_at_budget() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let started = Instant::now();
        let result: Result<(), Flaky> = retry_with_backoff(&RetryPolicy::default(), "test", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(4800)).await;
            Err(Flaky::Transient)
        })
        .await;

        // First attempt fails at 4.8s, the retry is cut off at 5s.
        assert_eq!(result, Err(Flaky::Transient));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() <= Duration::from_secs(5), "call took {:?}", started.elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_first_attempt_times_out() {
        let started = Instant::now();
        let result: Result<(), Flaky> = retry_with_backoff(&RetryPolicy::default(), "test", || async {
            std::future::pending::<()>().await;
            Ok(())
        })
        .await;

        assert_eq!(result, Err(Flaky::TimedOut("test")));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(5) && elapsed < Duration::from_millis(5010), "call took {:?}", elapsed);
    }

    #[test]
    fn test_next_delay_respects_budget() {
        let policy = fast_policy();
        assert!(policy.next_delay(1, Duration::ZERO).is_some());
        assert!(policy.next_delay(1, Duration::from_millis(4950)).is_none());
    }
}
