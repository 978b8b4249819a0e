//! Handler functions for user account API endpoints.
//!
//! These functions process sign-up and self-service account changes, interact
//! with the user service, and return user-specific information.

use crate::api::common::{ApiResponse, service_error_to_http};
use crate::auth::models::{AuthenticatedUser, UserInfo};
use crate::auth::service::AuthService;
use crate::database::models::{CreateNewUser, EditNicknameRequest};
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};

/// Registers a new user.
#[axum::debug_handler]
pub async fn sign_up(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateNewUser>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), (StatusCode, String)> {
    let user = UserService::new(&state.pool)
        .sign_up(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            UserInfo::from(&user),
            "User registered successfully",
        )),
    ))
}

/// Changes the caller's nickname.
#[axum::debug_handler]
pub async fn edit_nickname(
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(payload): Json<EditNicknameRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, String)> {
    tracing::info!("Changing nickname for user: {}", caller.id);

    let user = UserService::new(&state.pool)
        .edit_nickname(&caller.id, &payload.nickname)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        UserInfo::from(&user),
        "Nickname changed successfully",
    )))
}

/// Disables the caller's account and revokes their session.
#[axum::debug_handler]
pub async fn disable_me(
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    UserService::new(&state.pool)
        .disable_user(&caller.id)
        .await
        .map_err(service_error_to_http)?;

    AuthService::from_state(&state)
        .logout(&caller)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success((), "Account disabled")))
}
