//! Order handlers. Every route requires a verified token; the service
//! layer enforces ownership on top.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use cakeshop_core::types::pagination::PageResponse;
use cakeshop_entity::order::Order;
use cakeshop_entity::product::{Product, catalog};

use crate::dto::request::{CreateOrderRequest, OrderListQuery, UpdateOrderRequest};
use crate::dto::response::{ApiResponse, OrderStatsResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = state.order_service.create(&user, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(order))))
}

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<Json<ApiResponse<PageResponse<Order>>>> {
    let page = state
        .order_service
        .list(&user, query.status.as_deref(), &query.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/orders/stats
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<OrderStatsResponse>>> {
    let buckets = state.order_service.stats(&user).await?;
    Ok(Json(ApiResponse::ok(OrderStatsResponse::from_buckets(
        buckets,
    ))))
}

/// GET /api/orders/products/list
///
/// The priced catalog for the order form. Same data as the public
/// listing, but kept behind a token like every other order route.
pub async fn products(_user: AuthUser) -> Json<ApiResponse<Vec<Product>>> {
    Json(ApiResponse::ok(catalog::CATALOG.to_vec()))
}

/// GET /api/orders/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let order = state.order_service.get(&user, id).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// PUT /api/orders/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateOrderRequest>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let order = state.order_service.update(&user, id, body.into()).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// DELETE /api/orders/{id}
///
/// Orders are cancelled, never deleted; the cancelled order is
/// returned.
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Order>>> {
    let order = state.order_service.cancel(&user, id).await?;
    Ok(Json(ApiResponse::ok(order)))
}
