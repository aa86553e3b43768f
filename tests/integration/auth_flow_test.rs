//! Identity sync and profile management through the API.

use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = send(&app, req(Method::GET, "/api/auth/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, _) = send(
        &app,
        req(Method::GET, "/api/auth/me", Some("not.a.token"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let app = TestApp::new();
    let stale = token_with_claims(json!({
        "sub": "auth0|alice",
        "email": "alice@shop.test",
        "iss": format!("https://{TEST_DOMAIN}/"),
        "aud": TEST_AUDIENCE,
        "exp": Utc::now().timestamp() - 600,
    }));
    let (status, _) = send(
        &app,
        req(Method::GET, "/api/auth/status", Some(&stale), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sync_creates_and_reuses_profile() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");

    let (status, body) = send(&app, req(Method::POST, "/api/auth/profile", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["display_name"], "Alice Smith");
    let id = body["data"]["id"].clone();

    // Second sync updates rather than duplicates.
    let (status, body) = send(&app, req(Method::POST, "/api/auth/profile", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
}

#[tokio::test]
async fn test_profile_before_sync_is_not_found() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let (status, _) = send(&app, req(Method::GET, "/api/auth/me", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_auth_status_reflects_claims() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let (status, body) = send(&app, req(Method::GET, "/api/auth/status", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["authenticated"], true);
    assert_eq!(body["data"]["subject"], "auth0|alice");
    assert_eq!(body["data"]["email"], "alice@shop.test");
}

#[tokio::test]
async fn test_update_profile_fields() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    send(&app, req(Method::POST, "/api/auth/profile", Some(&alice), None)).await;

    let (status, body) = send(
        &app,
        req(
            Method::PUT,
            "/api/auth/profile",
            Some(&alice),
            Some(&json!({
                "username": "alice_baker",
                "country": "Portugal",
                "newsletter": true
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice_baker");
    assert_eq!(body["data"]["country"], "Portugal");
    assert_eq!(body["data"]["newsletter"], true);
}

#[tokio::test]
async fn test_update_profile_invalid_username() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    send(&app, req(Method::POST, "/api/auth/profile", Some(&alice), None)).await;

    let (status, body) = send(
        &app,
        req(
            Method::PUT,
            "/api/auth/profile",
            Some(&alice),
            Some(&json!({"username": "has spaces!"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_profile_username_conflict() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let bob = token("auth0|bob", "bob@shop.test");
    send(&app, req(Method::POST, "/api/auth/profile", Some(&alice), None)).await;
    send(&app, req(Method::POST, "/api/auth/profile", Some(&bob), None)).await;

    let (status, body) = send(
        &app,
        req(
            Method::PUT,
            "/api/auth/profile",
            Some(&bob),
            Some(&json!({"username": "alice"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    send(&app, req(Method::POST, "/api/auth/profile", Some(&alice), None)).await;

    let (status, body) = send(&app, req(Method::POST, "/api/auth/logout", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Logged out successfully");
}
