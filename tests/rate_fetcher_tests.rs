mod common;

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use common::{quote_body, spawn_stalling_upstream, spawn_upstream, FAST_RETRY};
use currency_monitor::{
    error::FetchError,
    services::rate_fetcher::{RateFetcher, RetryPolicy},
};

#[tokio::test]
async fn fetches_and_parses_quote() {
    let upstream = spawn_upstream(StatusCode::OK, quote_body("5.2512")).await;
    let fetcher = RateFetcher::new(&upstream.url).unwrap().with_retry_policy(FAST_RETRY);

    let rate = fetcher.fetch_current_rate().await.unwrap();

    assert_eq!(rate.ask, 5.2512);
    assert_eq!(rate.observed_at, 1_700_000_000_000);
    assert_eq!(upstream.hits(), 1);
}

#[tokio::test]
async fn persistent_server_error_uses_exactly_three_attempts() {
    let upstream = spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
    let policy = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(100),
        ..FAST_RETRY
    };
    let fetcher = RateFetcher::new(&upstream.url).unwrap().with_retry_policy(policy);

    let started = Instant::now();
    let err = fetcher.fetch_current_rate().await.unwrap_err();
    let elapsed = started.elapsed();

    assert_eq!(upstream.hits(), 3);
    assert!(matches!(err, FetchError::RetriesExhausted { attempts: 3, .. }));
    assert!(err.to_string().contains("500"), "last error missing: {err}");

    // 100ms + 200ms between attempts, nothing after the last one
    assert!(elapsed >= Duration::from_millis(300), "too fast: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(650), "slept after final attempt: {elapsed:?}");
}

#[tokio::test]
async fn unreachable_host_is_retried_then_fails() {
    // grab a free port and release it so nothing is listening there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = RateFetcher::new(format!("http://{addr}/json/last/USD-BRL"))
        .unwrap()
        .with_retry_policy(FAST_RETRY);

    let err = fetcher.fetch_current_rate().await.unwrap_err();
    assert!(matches!(err, FetchError::RetriesExhausted { attempts: 3, .. }));
}

#[tokio::test]
async fn malformed_body_fails_without_retrying() {
    let upstream = spawn_upstream(StatusCode::OK, r#"{"EURBRL":{"ask":"6.1"}}"#).await;
    let fetcher = RateFetcher::new(&upstream.url).unwrap().with_retry_policy(FAST_RETRY);

    let err = fetcher.fetch_current_rate().await.unwrap_err();

    assert_eq!(upstream.hits(), 1);
    assert!(err.to_string().contains("missing USDBRL data"));
}

#[tokio::test]
async fn non_json_body_is_invalid_response() {
    let upstream = spawn_upstream(StatusCode::OK, "<html>maintenance</html>").await;
    let fetcher = RateFetcher::new(&upstream.url).unwrap().with_retry_policy(FAST_RETRY);

    let err = fetcher.fetch_current_rate().await.unwrap_err();

    assert!(matches!(err, FetchError::InvalidResponse(_)));
    assert_eq!(upstream.hits(), 1);
}

#[tokio::test]
async fn unparseable_ask_fails() {
    let upstream = spawn_upstream(StatusCode::OK, quote_body("n/a")).await;
    let fetcher = RateFetcher::new(&upstream.url).unwrap().with_retry_policy(FAST_RETRY);

    let err = fetcher.fetch_current_rate().await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidNumber(_)));
}

#[tokio::test]
async fn slow_upstream_times_out_each_attempt_and_is_retried() {
    let upstream = spawn_stalling_upstream(Duration::from_secs(5)).await;
    let policy = RetryPolicy {
        attempt_timeout: Duration::from_millis(100),
        ..FAST_RETRY
    };
    let fetcher = RateFetcher::new(&upstream.url).unwrap().with_retry_policy(policy);

    let started = Instant::now();
    let err = fetcher.fetch_current_rate().await.unwrap_err();

    assert_eq!(upstream.hits(), 3);
    assert!(matches!(err, FetchError::RetriesExhausted { attempts: 3, .. }));
    assert!(err.to_string().contains("timed out after 100ms"), "{err}");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn default_attempt_timeout_is_ten_seconds() {
    assert_eq!(RetryPolicy::default().attempt_timeout, Duration::from_secs(10));
}
