//! Route definitions for the CakeShop HTTP API.
//!
//! All routes are mounted under `/api`. Request flow through the stack:
//! trace → CORS → security headers → general rate limit → sanitization
//! → (auth rate limit on `/auth/*`) → extractor/handler.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(product_routes())
        .merge(order_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        // Layers run top-down on the way out, bottom-up on the way in:
        // the last .layer() added sees the request first.
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::sanitize::sanitize_request,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::general_rate_limit,
        ))
        .layer(axum_middleware::from_fn(
            middleware::security_headers::security_headers,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Identity sync and profile endpoints, behind the stricter limiter.
fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/profile", post(handlers::auth::sync))
        .route("/auth/profile", put(handlers::auth::update_profile))
        .route("/auth/me", get(handlers::auth::get_profile))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/status", get(handlers::auth::status))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::auth_rate_limit,
        ))
}

/// Public catalog endpoints.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(handlers::product::list))
        .route(
            "/products/categories/list",
            get(handlers::product::categories),
        )
        .route("/products/search/{term}", get(handlers::product::search))
        .route(
            "/products/config/delivery",
            get(handlers::product::delivery_config),
        )
        .route("/products/{id}", get(handlers::product::get))
}

/// Order CRUD endpoints.
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(handlers::order::create))
        .route("/orders", get(handlers::order::list))
        .route("/orders/stats", get(handlers::order::stats))
        .route("/orders/products/list", get(handlers::order::products))
        .route("/orders/{id}", get(handlers::order::get))
        .route("/orders/{id}", put(handlers::order::update))
        .route("/orders/{id}", delete(handlers::order::cancel))
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
