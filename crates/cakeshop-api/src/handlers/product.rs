//! Catalog handlers. All public; the catalog carries no per-user data.

use axum::Json;
use axum::extract::{Path, Query, State};

use cakeshop_core::types::pagination::PageResponse;
use cakeshop_entity::product::Product;
use cakeshop_entity::product::delivery::DeliveryConfig;

use crate::dto::request::{PageParams, ProductQuery};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<ApiResponse<PageResponse<Product>>> {
    let page = state.product_service.list(
        query.category.as_deref(),
        query.search.as_deref(),
        &query.page_request(),
    );
    Json(ApiResponse::ok(page))
}

/// GET /api/products/categories/list
pub async fn categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::ok(state.product_service.categories()))
}

/// GET /api/products/search/{term}
pub async fn search(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Query(params): Query<PageParams>,
) -> Json<ApiResponse<PageResponse<Product>>> {
    let page = state
        .product_service
        .list(None, Some(&term), &params.page_request());
    Json(ApiResponse::ok(page))
}

/// GET /api/products/config/delivery
pub async fn delivery_config(State(state): State<AppState>) -> Json<ApiResponse<DeliveryConfig>> {
    Json(ApiResponse::ok(state.product_service.delivery_config()))
}

/// GET /api/products/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Product>>> {
    let product = state.product_service.get(&id)?;
    Ok(Json(ApiResponse::ok(product)))
}
