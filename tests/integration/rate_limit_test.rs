//! Sliding-window rate limiting across the middleware stack.

use axum::http::{Method, StatusCode};

use cakeshop_core::config::AppConfig;
use cakeshop_core::config::rate_limit::RateLimitPolicy;

use crate::helpers::*;

fn config_with_limits(general: u32, auth: u32, window_seconds: u64) -> AppConfig {
    let mut config = test_config();
    config.rate_limit.general = RateLimitPolicy {
        window_seconds,
        max_requests: general,
    };
    config.rate_limit.auth = RateLimitPolicy {
        window_seconds,
        max_requests: auth,
    };
    config
}

#[tokio::test]
async fn test_general_limit_rejects_excess_requests() {
    let app = TestApp::with_config(config_with_limits(5, 5, 60));

    for _ in 0..5 {
        let (status, _) = send(&app, req(Method::GET, "/api/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let response = send_raw(&app, req(Method::GET, "/api/health", None, None)).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
}

#[tokio::test]
async fn test_limits_are_per_client() {
    let app = TestApp::with_config(config_with_limits(2, 2, 60));

    for _ in 0..2 {
        send(&app, req_from("198.51.100.1", Method::GET, "/api/health", None, None)).await;
    }
    let (status, _) =
        send(&app, req_from("198.51.100.1", Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    // A different client still has budget.
    let (status, _) =
        send(&app, req_from("198.51.100.2", Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_limit_counts_failures() {
    let app = TestApp::with_config(config_with_limits(100, 3, 60));

    for _ in 0..3 {
        let (status, _) = send(
            &app,
            req(Method::GET, "/api/auth/status", Some("bad.token"), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, body) = send(
        &app,
        req(Method::GET, "/api/auth/status", Some("bad.token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_auth_limit_forgives_successes() {
    let app = TestApp::with_config(config_with_limits(100, 3, 60));
    let alice = token("auth0|alice", "alice@shop.test");

    // Far more successful requests than the budget; each one is
    // forgiven, so none of them trip the limiter.
    for _ in 0..10 {
        let (status, _) = send(
            &app,
            req(Method::GET, "/api/auth/status", Some(&alice), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_window_recovers() {
    let app = TestApp::with_config(config_with_limits(2, 2, 1));

    send(&app, req(Method::GET, "/api/health", None, None)).await;
    send(&app, req(Method::GET, "/api/health", None, None)).await;
    let (status, _) = send(&app, req(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let (status, _) = send(&app, req(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}
