//! Handler functions for authentication-related API endpoints.
//!
//! The access token travels in the `Authorization` response header and the
//! refresh token in the `refresh` cookie; the JSON body only describes the
//! user.

use crate::api::common::{ApiResponse, error_body, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, COOKIE, SET_COOKIE},
    },
    response::Json as ResponseJson,
};
use std::time::Duration;

pub const REFRESH_TOKEN_COOKIE_KEY: &str = "refresh";

type HandlerError = (StatusCode, String);

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, ResponseJson<ApiResponse<TokenResponse>>), HandlerError> {
    let tokens = AuthService::from_state(&state)
        .login(payload)
        .await
        .map_err(service_error_to_http)?;

    token_response(&state, tokens, "Login successful")
}

/// Handle token refresh request
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<(HeaderMap, ResponseJson<ApiResponse<TokenResponse>>), HandlerError> {
    let presented = cookie_value(&headers, REFRESH_TOKEN_COOKIE_KEY);

    let tokens = AuthService::from_state(&state)
        .refresh(presented.as_deref())
        .await
        .map_err(service_error_to_http)?;

    token_response(&state, tokens, "Token refreshed")
}

/// Handle logout request: revoke the refresh token and clear both transports
#[axum::debug_handler]
pub async fn logout(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<(HeaderMap, ResponseJson<ApiResponse<()>>), HandlerError> {
    AuthService::from_state(&state)
        .logout(&user)
        .await
        .map_err(service_error_to_http)?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static(""));
    headers.insert(SET_COOKIE, clear_refresh_cookie());

    Ok((
        headers,
        ResponseJson(ApiResponse::success((), "Logged out successfully")),
    ))
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(state): Extension<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, HandlerError> {
    let user = UserService::new(&state.pool)
        .get_user_required(&user.id)
        .await
        .map_err(service_error_to_http)?;

    Ok(ResponseJson(ApiResponse::success(
        UserInfo::from(&user),
        "User retrieved successfully",
    )))
}

fn token_response(
    state: &AppState,
    tokens: IssuedTokens,
    message: &str,
) -> Result<(HeaderMap, ResponseJson<ApiResponse<TokenResponse>>), HandlerError> {
    let internal = |e: axum::http::header::InvalidHeaderValue| {
        tracing::error!("Failed to build token headers: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_body("Internal server error", "internal_error"),
        )
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&tokens.access_token).map_err(internal)?,
    );
    headers.insert(
        SET_COOKIE,
        refresh_cookie(&tokens.refresh_token, tokens.refresh_ttl).map_err(internal)?,
    );

    let body = TokenResponse {
        user: UserInfo::from(&tokens.user),
        expires_in: state.config.jwt_expires_in_seconds,
    };
    Ok((headers, ResponseJson(ApiResponse::success(body, message))))
}

/// Build the `HttpOnly` refresh cookie.
pub fn refresh_cookie(
    token: &str,
    ttl: Duration,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{REFRESH_TOKEN_COOKIE_KEY}={token}; Path=/; Max-Age={}; HttpOnly; Secure; SameSite=Lax",
        ttl.as_secs()
    ))
}

fn clear_refresh_cookie() -> HeaderValue {
    HeaderValue::from_static("refresh=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=Lax")
}

/// Find a cookie by name in the request's `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
        .next()
}
