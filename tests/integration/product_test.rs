//! Public catalog endpoints.

use axum::http::{Method, StatusCode};

use crate::helpers::*;

#[tokio::test]
async fn test_list_is_public() {
    let app = TestApp::new();
    let (status, body) = send(&app, req(Method::GET, "/api/products", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total_items"], 10);
}

#[tokio::test]
async fn test_filter_by_category() {
    let app = TestApp::new();
    let (status, body) = send(
        &app,
        req(Method::GET, "/api/products?category=cupcakes", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|p| p["category"] == "cupcakes"));
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new();
    let (status, body) = send(
        &app,
        req(Method::GET, "/api/products?search=velvet", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["id"], "red-velvet");
}

#[tokio::test]
async fn test_search_route() {
    let app = TestApp::new();
    let (status, body) = send(
        &app,
        req(Method::GET, "/api/products/search/velvet", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["id"], "red-velvet");
}

#[tokio::test]
async fn test_get_by_id() {
    let app = TestApp::new();
    let (status, body) = send(&app, req(Method::GET, "/api/products/red-velvet", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price_cents"], 5200);

    let (status, _) = send(&app, req(Method::GET, "/api/products/unicorn-cake", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories() {
    let app = TestApp::new();
    let (status, body) = send(
        &app,
        req(Method::GET, "/api/products/categories/list", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        serde_json::json!(["cakes", "cupcakes", "desserts", "pastries"])
    );
}

#[tokio::test]
async fn test_delivery_config() {
    let app = TestApp::new();
    let (status, body) = send(
        &app,
        req(Method::GET, "/api/products/config/delivery", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slots"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["regions"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"]["excluded_weekday"], "sunday");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = send(&app, req(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}
