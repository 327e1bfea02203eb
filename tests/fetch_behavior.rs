//! Behavior-driven tests for the resilient fetch client.
//!
//! These verify HOW MANY attempts a logical retrieval makes, how it paces
//! them, and which typed failure the caller receives. The transport is a
//! scripted double, so every scenario is deterministic and offline.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use fiscus_core::{Backoff, FetchClient, FetchConfig, FetchError, RetryConfig};
use fiscus_tests::{HangingHttpClient, ScriptedHttpClient, ScriptedOutcome};

const URL: &str = "https://stats.example.test/data/gov_10a_exp";

fn client_with(
    transport: Arc<ScriptedHttpClient>,
    max_attempts: u32,
    base: Duration,
) -> FetchClient {
    FetchClient::new(
        transport,
        FetchConfig {
            timeout_per_attempt: Duration::from_millis(500),
            retry: RetryConfig {
                max_attempts,
                backoff: Backoff {
                    base,
                    jitter_max: Duration::from_millis(5),
                    max: Duration::from_secs(1),
                },
                retry_on_status: vec![429, 500, 502, 503, 504],
            },
        },
    )
}

// =============================================================================
// Retry-then-succeed
// =============================================================================

#[tokio::test]
async fn two_retryable_failures_then_success_takes_exactly_three_attempts() {
    let base = Duration::from_millis(20);
    let transport = Arc::new(ScriptedHttpClient::new([
        ScriptedOutcome::Status(503),
        ScriptedOutcome::Status(500),
        ScriptedOutcome::Status(200),
    ]));
    let client = client_with(transport.clone(), 3, base);

    let response = client.get(URL).await.expect("third attempt succeeds");

    assert_eq!(response.status, 200);
    assert_eq!(transport.attempt_count(), 3);

    // Two backoff delays, each at least base * 2^n.
    let instants = transport.attempt_instants();
    let first_gap = instants[1] - instants[0];
    let second_gap = instants[2] - instants[1];
    assert!(first_gap >= base, "first delay {first_gap:?} < {base:?}");
    assert!(
        second_gap >= base * 2,
        "second delay {second_gap:?} < {:?}",
        base * 2,
    );
}

#[tokio::test]
async fn transport_errors_are_retried_like_retryable_statuses() {
    let transport = Arc::new(ScriptedHttpClient::new([
        ScriptedOutcome::TransportError("connection refused"),
        ScriptedOutcome::TransportError("dns failure"),
        ScriptedOutcome::Status(200),
    ]));
    let client = client_with(transport.clone(), 3, Duration::from_millis(1));

    let response = client.get(URL).await.expect("third attempt succeeds");
    assert_eq!(response.status, 200);
    assert_eq!(transport.attempt_count(), 3);
}

// =============================================================================
// Fatal statuses
// =============================================================================

#[tokio::test]
async fn fatal_status_fails_after_one_attempt_with_no_delay() {
    let base = Duration::from_millis(100);
    let transport = Arc::new(ScriptedHttpClient::new([ScriptedOutcome::Status(404)]));
    let client = client_with(transport.clone(), 3, base);

    let started = std::time::Instant::now();
    let err = client.get(URL).await.expect_err("404 is fatal");

    assert_eq!(transport.attempt_count(), 1);
    assert!(
        started.elapsed() < base,
        "fatal status must not wait out a backoff delay",
    );
    match err {
        FetchError::FatalStatus { url, status } => {
            assert_eq!(url, URL);
            assert_eq!(status, 404);
        }
        other => panic!("expected FatalStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn fatal_status_preempts_remaining_retry_budget() {
    // Retryable failure first, then a 401: the budget had one attempt left,
    // but the fatal status must end the call immediately.
    let transport = Arc::new(ScriptedHttpClient::new([
        ScriptedOutcome::Status(503),
        ScriptedOutcome::Status(401),
    ]));
    let client = client_with(transport.clone(), 3, Duration::from_millis(1));

    let err = client.get(URL).await.expect_err("401 is fatal");
    assert_eq!(transport.attempt_count(), 2);
    assert!(matches!(err, FetchError::FatalStatus { status: 401, .. }));
}

// =============================================================================
// Exhaustion
// =============================================================================

#[tokio::test]
async fn persistent_retryable_failures_exhaust_the_budget() {
    let transport = Arc::new(ScriptedHttpClient::new([
        ScriptedOutcome::Status(503),
        ScriptedOutcome::Status(503),
        ScriptedOutcome::Status(503),
    ]));
    let client = client_with(transport.clone(), 3, Duration::from_millis(1));

    let err = client.get(URL).await.expect_err("budget exhausted");

    assert_eq!(transport.attempt_count(), 3);
    match err {
        FetchError::RetriesExhausted { url, attempts } => {
            assert_eq!(url, URL);
            assert_eq!(attempts, 3);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn a_single_attempt_budget_never_retries() {
    let transport = Arc::new(ScriptedHttpClient::new([ScriptedOutcome::Status(503)]));
    let client = client_with(transport.clone(), 1, Duration::from_millis(1));

    let err = client.get(URL).await.expect_err("budget exhausted");
    assert_eq!(transport.attempt_count(), 1);
    assert!(matches!(
        err,
        FetchError::RetriesExhausted { attempts: 1, .. }
    ));
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn cancelling_during_an_attempt_aborts_without_further_retries() {
    let transport = Arc::new(HangingHttpClient::new());
    let client = FetchClient::new(transport.clone(), FetchConfig::default());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = client.fetch(URL, &cancel).await.expect_err("must cancel");
    assert!(matches!(err, FetchError::Cancelled { .. }));
    assert_eq!(transport.attempt_count(), 1, "no retry after cancellation");
}

#[tokio::test]
async fn cancelling_during_backoff_skips_the_remaining_attempts() {
    let base = Duration::from_millis(200);
    let transport = Arc::new(ScriptedHttpClient::new([
        ScriptedOutcome::Status(503),
        ScriptedOutcome::Status(200),
    ]));
    let client = client_with(transport.clone(), 3, base);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        // Fires while the client is sleeping out the first backoff delay.
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client.fetch(URL, &cancel).await.expect_err("must cancel");
    assert!(matches!(err, FetchError::Cancelled { .. }));
    assert_eq!(transport.attempt_count(), 1);
}

#[tokio::test]
async fn a_cancelled_token_distinguishes_abort_from_exhaustion() {
    let transport = Arc::new(ScriptedHttpClient::new([ScriptedOutcome::Status(503)]));
    let client = client_with(transport.clone(), 1, Duration::from_millis(1));
    let exhausted = client.get(URL).await.expect_err("exhaustion path");

    let cancel = CancellationToken::new();
    cancel.cancel();
    let cancelled = client.fetch(URL, &cancel).await.expect_err("cancel path");

    assert!(matches!(exhausted, FetchError::RetriesExhausted { .. }));
    assert!(matches!(cancelled, FetchError::Cancelled { .. }));
    // The pre-cancelled call never reached the transport.
    assert_eq!(transport.attempt_count(), 1);
}
