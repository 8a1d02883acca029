//! Constant-backoff retry for fallible async operations
//!
//! The operation itself classifies each failure as retryable or fatal, so
//! the policy never has to guess from error text. Backoff is a fixed pause
//! between attempts; no jitter, no exponential growth.

use std::future::Future;
use std::time::Duration;

/// One attempt's result, classified by the operation.
#[derive(Debug)]
pub enum Attempt<T> {
    /// The operation succeeded.
    Ok(T),
    /// The operation failed in a way that another attempt might fix.
    Retryable(String),
    /// The operation failed in a way no retry can fix. Stop immediately.
    Fatal(String),
}

/// Fixed retry budget: up to `max_attempts` tries with a constant pause
/// between consecutive tries.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }
}

/// Terminal outcome of running an operation under a [`RetryPolicy`].
#[derive(Debug)]
pub enum RetryOutcome<T> {
    /// Some attempt succeeded.
    Ok(T),
    /// Every attempt failed retryably.
    Exhausted { attempts: u32, last_error: String },
    /// An attempt failed fatally; remaining budget was abandoned.
    Fatal(String),
}

/// Runs `operation` until it succeeds, fails fatally, or the attempt budget
/// runs out. Sleeps for the policy's backoff between attempts but not after
/// the final one.
pub async fn run_with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> RetryOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let mut last_error = String::new();

    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Attempt::Ok(value) => return RetryOutcome::Ok(value),
            Attempt::Fatal(error) => return RetryOutcome::Fatal(error),
            Attempt::Retryable(error) => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    %error,
                    "attempt failed"
                );
                last_error = error;
                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.backoff).await;
                }
            }
        }
    }

    RetryOutcome::Exhausted {
        attempts: policy.max_attempts,
        last_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_immediate_success() {
        let calls = AtomicU32::new(0);
        let outcome = run_with_retry(quick_policy(3), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Attempt::Ok(42)
        })
        .await;

        assert!(matches!(outcome, RetryOutcome::Ok(42)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_after_retryable_failures() {
        let calls = AtomicU32::new(0);
        let outcome = run_with_retry(quick_policy(5), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Attempt::Retryable(format!("flaky failure {n}"))
            } else {
                Attempt::Ok("done")
            }
        })
        .await;

        assert!(matches!(outcome, RetryOutcome::Ok("done")));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausted_reports_last_error_and_attempts() {
        let calls = AtomicU32::new(0);
        let outcome: RetryOutcome<()> = run_with_retry(quick_policy(3), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Attempt::Retryable(format!("failure {n}"))
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match outcome {
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, "failure 3");
            }
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fatal_short_circuits() {
        let calls = AtomicU32::new(0);
        let outcome: RetryOutcome<()> = run_with_retry(quick_policy(5), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Attempt::Fatal("broken selector".to_string())
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(outcome, RetryOutcome::Fatal(e) if e == "broken selector"));
    }

    #[tokio::test]
    async fn test_single_attempt_budget() {
        let calls = AtomicU32::new(0);
        let outcome: RetryOutcome<()> = run_with_retry(quick_policy(1), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Attempt::Retryable("once".to_string())
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(outcome, RetryOutcome::Exhausted { attempts: 1, .. }));
    }
}
