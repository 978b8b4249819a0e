//! Custom error types specific to authentication failures.
//!
//! An absent user and a wrong password share one kind. Token failures are
//! reported separately.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown or disabled email, or password mismatch.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The refresh cookie was not sent.
    #[error("Refresh token is missing")]
    MissingRefreshToken,

    /// Undecodable, expired or wrong-kind token, or its subject is no longer an enabled user.
    #[error("Invalid token")]
    InvalidToken,

    /// The refresh token is not the one currently cached for the user.
    #[error("Refresh token does not match the active session")]
    TokenMismatch,
}

impl AuthError {
    /// Machine-readable identifier used in error responses.
    pub fn error_type(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingRefreshToken => "missing_refresh_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::TokenMismatch => "token_mismatch",
        }
    }
}
