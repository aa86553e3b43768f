//! Shared test harness.
//!
//! Builds the real router over the in-memory stores with a verifier
//! preloaded from the RSA test fixtures, so requests exercise the whole
//! stack without a database or identity provider.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Datelike, Utc, Weekday};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

use cakeshop_api::{AppState, build_router};
use cakeshop_auth::TokenVerifier;
use cakeshop_core::config::AppConfig;
use cakeshop_database::memory::{MemoryOrderStore, MemoryUserStore};

pub const PRIVATE_PEM: &str = include_str!("../fixtures/jwt_test_private.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/jwt_test_public.pem");
pub const TEST_KID: &str = "test-key";

pub const TEST_DOMAIN: &str = "cakeshop.test.auth0.local";
pub const TEST_AUDIENCE: &str = "https://api.cakeshop.test";

/// Default source IP for requests; individual tests pass their own to
/// keep rate-limit buckets separate.
pub const TEST_IP: &str = "203.0.113.10";

/// The router plus direct handles on its stores for test setup.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
    pub orders: Arc<MemoryOrderStore>,
}

impl TestApp {
    /// App with the default test configuration.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// App with a custom configuration (used by the rate-limit tests).
    pub fn with_config(config: AppConfig) -> Self {
        let config = Arc::new(config);

        let key = DecodingKey::from_rsa_pem(PUBLIC_PEM.as_bytes())
            .expect("valid test public key");
        let mut keys = HashMap::new();
        keys.insert(TEST_KID.to_string(), key);
        let verifier = Arc::new(TokenVerifier::with_key_set(&config.auth, keys));

        let users = Arc::new(MemoryUserStore::new());
        let orders = Arc::new(MemoryOrderStore::new());

        let state = AppState::new(config, users.clone(), orders.clone(), verifier);
        Self {
            router: build_router(state),
            users,
            orders,
        }
    }
}

/// Default test configuration pointing at the fixture tenant.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.domain = TEST_DOMAIN.to_string();
    config.auth.audience = TEST_AUDIENCE.to_string();
    config
}

/// Sign a token for `subject` with the fixture key.
pub fn token(subject: &str, email: &str) -> String {
    token_with_claims(json!({
        "sub": subject,
        "email": email,
        "name": "Alice Smith",
        "iss": format!("https://{TEST_DOMAIN}/"),
        "aud": TEST_AUDIENCE,
        "exp": Utc::now().timestamp() + 600,
    }))
}

/// Sign arbitrary claims with the fixture key.
pub fn token_with_claims(claims: Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(TEST_KID.to_string());
    let key = EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).expect("valid test private key");
    encode(&header, &claims, &key).expect("token signs")
}

/// Build a request with the default source IP.
pub fn req(method: Method, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    req_from(TEST_IP, method, uri, token, body)
}

/// Build a request from a specific source IP.
pub fn req_from(
    ip: &str,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", ip)
        .header("user-agent", "cakeshop-tests");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).expect("body serializes")))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

/// Send a request and return the raw response, headers included.
pub async fn send_raw(app: &TestApp, request: Request<Body>) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(request)
        .await
        .expect("request handled")
}

/// Send a request and return status plus parsed JSON body.
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = send_raw(app, request).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// The next deliverable date: tomorrow, skipping Sunday. `YYYY-MM-DD`.
pub fn next_delivery_date() -> String {
    let mut date = Utc::now().date_naive() + chrono::Days::new(1);
    while date.weekday() == Weekday::Sun {
        date = date + chrono::Days::new(1);
    }
    date.format("%Y-%m-%d").to_string()
}

/// A valid create-order body.
pub fn order_body() -> Value {
    json!({
        "product_name": "Classic Chocolate Cake",
        "quantity": 3,
        "delivery_date": next_delivery_date(),
        "delivery_slot": "afternoon",
        "delivery_region": "Downtown",
        "message": "Happy birthday!"
    })
}

/// Create an order via the API and return its JSON.
pub async fn place_order(app: &TestApp, token: &str) -> Value {
    let (status, body) = send(
        app,
        req(Method::POST, "/api/orders", Some(token), Some(&order_body())),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "order creation failed: {body}");
    body["data"].clone()
}
