//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation, validation, and claims management for the
//! access/refresh token pair issued at login.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::errors::AuthError;
use crate::config::Config;
use crate::database::models::User;
use crate::errors::ServiceError;

/// Which half of the token pair a JWT is.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User email
    pub sub: String,
    /// User ID
    pub uid: String,
    pub typ: TokenKind,
    /// Unique token ID
    pub jti: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the loaded configuration
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        if config.jwt_secret.is_empty() {
            return Err(ServiceError::internal_error("JWT secret must not be empty"));
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let access_ttl = Duration::from_std(config.access_token_ttl())
            .map_err(|e| ServiceError::internal_error(format!("Invalid access TTL: {}", e)))?;
        let refresh_ttl = Duration::from_std(config.refresh_token_ttl())
            .map_err(|e| ServiceError::internal_error(format!("Invalid refresh TTL: {}", e)))?;

        Ok(JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            access_ttl,
            refresh_ttl,
        })
    }

    /// Generate a short-lived access token for a user
    pub fn generate_access_token(&self, user: &User) -> Result<String, ServiceError> {
        self.generate(user, TokenKind::Access, self.access_ttl)
    }

    /// Generate a refresh token (longer expiration)
    pub fn generate_refresh_token(&self, user: &User) -> Result<String, ServiceError> {
        self.generate(user, TokenKind::Refresh, self.refresh_ttl)
    }

    fn generate(
        &self,
        user: &User,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: user.email.clone(),
            uid: user.id.clone(),
            typ: kind,
            jti: Uuid::new_v4().to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                ServiceError::from(AuthError::InvalidToken)
            })
    }

    /// Validate a token of the expected kind and return its claims
    pub fn validate_kind(&self, token: &str, kind: TokenKind) -> Result<Claims, ServiceError> {
        let claims = self.validate_token(token)?;
        if claims.typ != kind {
            return Err(AuthError::InvalidToken.into());
        }
        Ok(claims)
    }

    /// Extract the subject (user email) from a token of the expected kind
    pub fn subject_of(&self, token: &str, kind: TokenKind) -> Result<String, ServiceError> {
        self.validate_kind(token, kind).map(|claims| claims.sub)
    }
}
