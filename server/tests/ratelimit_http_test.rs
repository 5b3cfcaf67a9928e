//! HTTP-level rate limiting tests.
//!
//! The limiter's counters live behind an `Arc`, so state persists across
//! `oneshot` calls on clones of the same router. Requests without a peer
//! address are bucketed as 127.0.0.1.
//!
//! Run with: `cargo test --test ratelimit_http_test`

mod helpers;

use axum::http::{header, StatusCode};
use helpers::{body_to_json, TestApp};

#[tokio::test]
async fn test_requests_over_limit_get_429() {
    let app = TestApp::with_rate_limit(2);

    let first = app.get("/").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-ratelimit-limit"], "2");
    assert_eq!(first.headers()["x-ratelimit-remaining"], "1");

    let second = app.get("/").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()["x-ratelimit-remaining"], "0");

    let third = app.get("/").await;
    assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = third.headers()[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after > 0);

    let body = body_to_json(third).await;
    assert_eq!(body["error"], "rate_limited");
    assert_eq!(
        body["message"],
        "Too many requests from this IP, please try again later."
    );
}

#[tokio::test]
async fn test_limit_applies_to_unknown_routes() {
    let app = TestApp::with_rate_limit(1);

    assert_eq!(app.get("/missing").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        app.get("/missing").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_no_limit_headers_when_disabled() {
    let app = TestApp::new();

    for _ in 0..5 {
        let response = app.get("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key("x-ratelimit-limit"));
    }
}
