//! Tests for the retry wrapper

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::retry::{retry, Backoff, RetryPolicy};

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::fixed(max_retries, Duration::from_millis(10))
        .with_attempt_timeout(Duration::from_millis(100))
}

#[test]
fn test_fixed_delay_is_constant() {
    let policy = RetryPolicy::fixed(3, Duration::from_secs(10));
    assert_eq!(policy.delay(0), Duration::from_secs(10));
    assert_eq!(policy.delay(1), Duration::from_secs(10));
    assert_eq!(policy.delay(5), Duration::from_secs(10));
}

#[test]
fn test_exponential_delay_doubles_and_caps() {
    let policy = RetryPolicy::exponential(10, Duration::from_secs(1));
    assert_eq!(policy.backoff, Backoff::Exponential);
    assert_eq!(policy.delay(0), Duration::from_secs(1));
    assert_eq!(policy.delay(1), Duration::from_secs(2));
    assert_eq!(policy.delay(3), Duration::from_secs(8));
    // capped at 64x base
    assert_eq!(policy.delay(6), Duration::from_secs(64));
    assert_eq!(policy.delay(20), Duration::from_secs(64));
}

#[tokio::test(start_paused = true)]
async fn test_success_on_first_attempt() {
    let calls = AtomicU32::new(0);
    let result = retry(&fast_policy(3), "op", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, String>(42) }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_recovers_within_budget() {
    let calls = AtomicU32::new(0);
    let result = retry(&fast_policy(3), "op", || {
        let attempt = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt < 2 {
                Err("transient".to_string())
            } else {
                Ok(attempt)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_reports_attempts_and_last_error() {
    let calls = AtomicU32::new(0);
    let result = retry(&fast_policy(2), "ledger query", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err::<(), _>("connection refused".to_string()) }
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.operation, "ledger query");
    assert_eq!(err.attempts, 3);
    assert_eq!(err.last_error, "connection refused");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(err.to_string().contains("after 3 attempts"));
}

#[tokio::test(start_paused = true)]
async fn test_zero_retries_means_single_attempt() {
    let calls = AtomicU32::new(0);
    let result = retry(&fast_policy(0), "op", || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err::<(), _>("nope".to_string()) }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_counts_as_transient_failure() {
    let policy = fast_policy(1);
    let result: Result<(), _> = retry(&policy, "slow op", || async {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok::<(), String>(())
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.attempts, 2);
    assert!(err.last_error.contains("timed out"));
}
