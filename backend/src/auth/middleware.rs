//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer access token and attaches the caller's identity to
//! the request for handlers downstream.

use crate::api::common::error_body;
use crate::auth::errors::AuthError;
use crate::auth::models::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::jwt::TokenKind;
use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() { None } else { Some(token) }
}

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let unauthorized = |kind: AuthError| {
        (
            StatusCode::UNAUTHORIZED,
            error_body(kind.to_string(), kind.error_type()),
        )
    };

    let token = bearer_token(request.headers()).ok_or(unauthorized(AuthError::InvalidToken))?;

    let claims = state
        .jwt_utils
        .validate_kind(token, TokenKind::Access)
        .map_err(|_| unauthorized(AuthError::InvalidToken))?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
