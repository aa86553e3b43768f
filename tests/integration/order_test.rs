//! Order lifecycle through the API.

use axum::http::{Method, StatusCode};
use chrono::{Datelike, Days, Utc, Weekday};
use serde_json::json;
use uuid::Uuid;

use cakeshop_database::store::OrderStore;
use cakeshop_entity::order::OrderStatus;

use crate::helpers::*;

/// The next Sunday, as `YYYY-MM-DD`.
fn next_sunday() -> String {
    let mut date = Utc::now().date_naive() + Days::new(1);
    while date.weekday() != Weekday::Sun {
        date = date + Days::new(1);
    }
    date.format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn test_create_requires_auth() {
    let app = TestApp::new();
    let (status, _) = send(&app, req(Method::POST, "/api/orders", None, Some(&order_body()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_computes_price_from_catalog() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let order = place_order(&app, &alice).await;

    assert_eq!(order["unit_price_cents"], 4500);
    assert_eq!(order["total_price_cents"], 13_500);
    assert_eq!(order["status"], "pending");
    assert!(order["order_number"].as_str().unwrap().starts_with("ORD-"));
    // Request metadata is captured but never exposed.
    assert!(order.get("client_ip").is_none());
    assert!(order.get("user_agent").is_none());
}

#[tokio::test]
async fn test_update_recomputes_total_and_keeps_order_number() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let order = place_order(&app, &alice).await;
    let id = order["id"].as_str().unwrap();
    let number = order["order_number"].clone();

    let (status, body) = send(
        &app,
        req(
            Method::PUT,
            &format!("/api/orders/{id}"),
            Some(&alice),
            Some(&json!({"quantity": 5})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_price_cents"], 5 * 4500);
    assert_eq!(body["data"]["order_number"], number);
}

#[tokio::test]
async fn test_blank_message_update_clears_message() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let order = place_order(&app, &alice).await;
    let id = order["id"].as_str().unwrap();
    assert!(order["message"].is_string());

    let (status, body) = send(
        &app,
        req(
            Method::PUT,
            &format!("/api/orders/{id}"),
            Some(&alice),
            Some(&json!({"message": ""})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["message"].is_null());
}

#[tokio::test]
async fn test_all_violations_reported_together() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let (status, body) = send(
        &app,
        req(
            Method::POST,
            "/api/orders",
            Some(&alice),
            Some(&json!({
                "product_name": "Mystery Pie",
                "quantity": 0,
                "delivery_date": "2020-01-01",
                "delivery_slot": "midnight",
                "delivery_region": "Atlantis"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_sunday_delivery_rejected() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let mut body = order_body();
    body["delivery_date"] = json!(next_sunday());

    let (status, response) = send(
        &app,
        req(Method::POST, "/api/orders", Some(&alice), Some(&body)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["message"].as_str().unwrap().contains("Sunday"));
}

#[tokio::test]
async fn test_foreign_order_is_forbidden() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let bob = token("auth0|bob", "bob@shop.test");
    let order = place_order(&app, &alice).await;
    let id = order["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        req(Method::GET, &format!("/api/orders/{id}"), Some(&bob), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let (status, _) = send(
        &app,
        req(
            Method::GET,
            &format!("/api/orders/{}", Uuid::new_v4()),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shipped_order_rejects_update_with_conflict() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let order = place_order(&app, &alice).await;
    let id: Uuid = order["id"].as_str().unwrap().parse().unwrap();

    // Fulfilment moves the order to shipped outside the customer API.
    let mut stored = app.orders.find_by_id(id).await.unwrap().unwrap();
    stored.status = OrderStatus::Shipped;
    app.orders.update(&stored).await.unwrap();

    let (status, body) = send(
        &app,
        req(
            Method::PUT,
            &format!("/api/orders/{id}"),
            Some(&alice),
            Some(&json!({"quantity": 1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    // And it can no longer be cancelled either.
    let (status, _) = send(
        &app,
        req(Method::DELETE, &format!("/api/orders/{id}"), Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancel_pending_order() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let order = place_order(&app, &alice).await;
    let id = order["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        req(Method::DELETE, &format!("/api/orders/{id}"), Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");

    // Cancelling twice is a state conflict.
    let (status, _) = send(
        &app,
        req(Method::DELETE, &format!("/api/orders/{id}"), Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_order_form_catalog_requires_auth() {
    let app = TestApp::new();
    let (status, _) = send(&app, req(Method::GET, "/api/orders/products/list", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let alice = token("auth0|alice", "alice@shop.test");
    let (status, body) = send(
        &app,
        req(Method::GET, "/api/orders/products/list", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert!(items.iter().all(|p| p["price_cents"].as_i64().unwrap() > 0));
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let first = place_order(&app, &alice).await;
    place_order(&app, &alice).await;
    place_order(&app, &alice).await;

    let id = first["id"].as_str().unwrap();
    send(
        &app,
        req(Method::DELETE, &format!("/api/orders/{id}"), Some(&alice), None),
    )
    .await;

    let (status, body) = send(
        &app,
        req(Method::GET, "/api/orders?status=pending", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 2);

    let (status, body) = send(
        &app,
        req(Method::GET, "/api/orders?status=cancelled", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 1);

    let (status, _) = send(
        &app,
        req(Method::GET, "/api/orders?status=teleported", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_metadata_is_consistent() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    for _ in 0..3 {
        place_order(&app, &alice).await;
    }

    let (status, body) = send(
        &app,
        req(Method::GET, "/api/orders?page=1&page_size=2", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["total_items"], 3);
    assert_eq!(data["total_pages"], 2);
    assert_eq!(data["has_next"], true);
    assert_eq!(data["has_previous"], false);

    let (_, body) = send(
        &app,
        req(Method::GET, "/api/orders?page=2&page_size=2", Some(&alice), None),
    )
    .await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["has_previous"], true);
}

#[tokio::test]
async fn test_stats_aggregate_own_orders_only() {
    let app = TestApp::new();
    let alice = token("auth0|alice", "alice@shop.test");
    let bob = token("auth0|bob", "bob@shop.test");
    place_order(&app, &alice).await;
    place_order(&app, &alice).await;
    place_order(&app, &bob).await;

    let (status, body) = send(&app, req(Method::GET, "/api/orders/stats", Some(&alice), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_orders"], 2);
    assert_eq!(body["data"]["total_cents"], 2 * 13_500);
}
