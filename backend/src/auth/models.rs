//! Data structures for authentication-related entities.
//!
//! This module defines the login payload, the identity attached to
//! authenticated requests, and the token pair produced by the auth flow.

use crate::database::models::User;
use crate::utils::jwt::Claims;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Identity of the caller, taken from a validated access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.uid,
            email: claims.sub,
        }
    }
}

/// Token pair issued by login and refresh.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the refresh token, its cookie and its cache entry.
    pub refresh_ttl: Duration,
    pub user: User,
}

/// User information returned after login, refresh and from `/me`
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
        }
    }
}

/// Body returned alongside the token headers
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub user: UserInfo,
    /// Access token expiration in seconds
    pub expires_in: u64,
}
