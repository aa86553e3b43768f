//! Identity and profile handlers.
//!
//! Authentication itself happens at the external provider; these
//! endpoints sync the verified identity into a local profile and manage
//! its shop-specific fields.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use cakeshop_entity::user::User;

use crate::dto::request::{UpdateProfileRequest, map_validation_errors};
use crate::dto::response::{ApiResponse, AuthStatusResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/profile
///
/// Upsert the caller's profile from their verified token claims.
pub async fn sync(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let profile = state.user_service.sync_profile(&user).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/auth/me
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let profile = state.user_service.get_profile(&user).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<User>>> {
    body.validate().map_err(map_validation_errors)?;
    let profile = state
        .user_service
        .update_profile(&user, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.user_service.record_logout(&user).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Logged out successfully",
    ))))
}

/// GET /api/auth/status
pub async fn status(user: AuthUser) -> Json<ApiResponse<AuthStatusResponse>> {
    Json(ApiResponse::ok(AuthStatusResponse {
        authenticated: true,
        subject: user.subject.clone(),
        email: user.email.clone(),
    }))
}
