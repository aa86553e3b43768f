//! Input sanitization and security headers across the stack.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn test_script_in_order_message_is_rejected() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");

    let mut body = order_body();
    body["message"] = json!("<script>document.location='http://evil.test'</script>");

    // The sanitizer escapes the markup, and the validator still rejects
    // the escaped remnant: hostile messages are refused, not laundered.
    let (status, response) = send(
        &app,
        req(Method::POST, "/api/orders", Some(&alice), Some(&body)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_markup_in_profile_fields_is_escaped() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    send(&app, req(Method::POST, "/api/auth/profile", Some(&alice), None)).await;

    let (status, body) = send(
        &app,
        req(
            Method::PUT,
            "/api/auth/profile",
            Some(&alice),
            Some(&json!({"country": "<b>Portugal</b>"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["country"], "&lt;b&gt;Portugal&lt;/b&gt;");
}

#[tokio::test]
async fn test_query_injection_is_neutralized() {
    let app = TestApp::new();
    let (status, body) = send(
        &app,
        req(
            Method::GET,
            "/api/products?search=%3Cscript%3Ealert(1)%3C/script%3E",
            None,
            None,
        ),
    )
    .await;
    // No server error, no matches; the escaped term simply finds nothing.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_markup_in_path_params_is_escaped() {
    let app = TestApp::new();

    // The unknown-product message echoes the requested id, so it shows
    // exactly what the handler received for the path parameter.
    let (status, body) = send(
        &app,
        req(
            Method::GET,
            "/api/products/%3Cscript%3Ealert(1)%3C%2Fscript%3E",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body["message"].as_str().unwrap();
    assert!(!message.contains("<script"));
    assert!(message.contains("&lt;script"));

    let (status, body) = send(
        &app,
        req(
            Method::GET,
            "/api/products/search/%3Cscript%3Echocolate%3C%2Fscript%3E",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = TestApp::new();
    let response = send_raw(&app, req(Method::GET, "/api/health", None, None)).await;
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");

    // Default limit is 64 KiB.
    let mut body = order_body();
    body["message"] = json!("x".repeat(100 * 1024));

    let (status, _) = send(
        &app,
        req(Method::POST, "/api/orders", Some(&alice), Some(&body)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
