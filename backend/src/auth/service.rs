//! Core business logic for the authentication system.
//!
//! A user has at most one live refresh token, mirrored in the token cache
//! under `refresh::<user id>`. A presented refresh token is only honoured if
//! it equals that entry byte-for-byte.

use crate::auth::errors::AuthError;
use crate::auth::models::{AuthenticatedUser, IssuedTokens, LoginRequest};
use crate::auth::token_cache::{TokenCache, refresh_token_key};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult, validation_message};
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::UserService;
use crate::state::AppState;
use crate::utils::jwt::{JwtUtils, TokenKind};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{info, warn};
use validator::Validate;

/// Authentication service for login, token rotation and logout
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: &'a JwtUtils,
    token_cache: &'a dyn TokenCache,
    user_service: UserService<'a>,
    refresh_ttl: Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(
        pool: &'a SqlitePool,
        jwt_utils: &'a JwtUtils,
        token_cache: &'a dyn TokenCache,
        refresh_ttl: Duration,
    ) -> Self {
        AuthService {
            pool,
            jwt_utils,
            token_cache,
            user_service: UserService::new(pool),
            refresh_ttl,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            &state.pool,
            state.jwt_utils.as_ref(),
            state.token_cache.as_ref(),
            state.config.refresh_token_ttl(),
        )
    }

    /// Authenticate an enabled user by email and password and issue a token pair
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<IssuedTokens> {
        if let Err(validation_errors) = login_request.validate() {
            return Err(ServiceError::validation(validation_message(
                &validation_errors,
            )));
        }

        let user = self
            .user_service
            .authenticate_user(&login_request.email, &login_request.password)
            .await?;

        let tokens = self.issue_token(user).await?;
        info!("User {} logged in", tokens.user.id);
        Ok(tokens)
    }

    /// Exchange the current refresh token for a new pair (rotation)
    ///
    /// The cache entry is swapped only if it still holds `refresh_token`, so
    /// of two refreshes presenting the same token at most one succeeds.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> ServiceResult<IssuedTokens> {
        let refresh_token = refresh_token
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let email = self.jwt_utils.subject_of(refresh_token, TokenKind::Refresh)?;

        let user = UserRepository::new(self.pool)
            .find_enabled_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        let key = refresh_token_key(&user.id);
        let (access_token, new_refresh_token) = self.generate_pair(&user)?;

        let swapped = self
            .token_cache
            .compare_and_swap(&key, refresh_token, &new_refresh_token, self.refresh_ttl)
            .await?;
        if !swapped {
            warn!("Rejected stale refresh token for user {}", user.id);
            return Err(AuthError::TokenMismatch.into());
        }

        Ok(IssuedTokens {
            access_token,
            refresh_token: new_refresh_token,
            refresh_ttl: self.refresh_ttl,
            user,
        })
    }

    /// Revoke the user's refresh token. Calling it again is harmless.
    pub async fn logout(&self, user: &AuthenticatedUser) -> ServiceResult<()> {
        self.token_cache
            .delete(&refresh_token_key(&user.id))
            .await?;
        info!("User {} logged out", user.id);
        Ok(())
    }

    /// Issue a fresh pair and make its refresh token the user's only valid one
    async fn issue_token(&self, user: User) -> ServiceResult<IssuedTokens> {
        let (access_token, refresh_token) = self.generate_pair(&user)?;

        self.token_cache
            .set_with_expiry(&refresh_token_key(&user.id), &refresh_token, self.refresh_ttl)
            .await?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            refresh_ttl: self.refresh_ttl,
            user,
        })
    }

    fn generate_pair(&self, user: &User) -> ServiceResult<(String, String)> {
        let access_token = self.jwt_utils.generate_access_token(user)?;
        let refresh_token = self.jwt_utils.generate_refresh_token(user)?;
        Ok((access_token, refresh_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::test_support::{memory_pool, seed_user};

    async fn test_state() -> AppState {
        AppState::new(memory_pool().await, Config::for_tests()).unwrap()
    }

    fn login_form(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    async fn cached_refresh(state: &AppState, user_id: &str) -> Option<String> {
        state
            .token_cache
            .get(&refresh_token_key(user_id))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_issues_tokens_and_caches_refresh() {
        let state = test_state().await;
        let user = seed_user(&state.pool, "a@x.com", "alpha", "p1").await;
        let service = AuthService::from_state(&state);

        let tokens = service.login(login_form("a@x.com", "p1")).await.unwrap();
        assert!(!tokens.access_token.is_empty());
        assert_eq!(tokens.user.id, user.id);
        assert_eq!(tokens.refresh_ttl, Duration::from_secs(60));
        assert_eq!(
            cached_refresh(&state, &user.id).await.as_deref(),
            Some(tokens.refresh_token.as_str())
        );
    }

    #[tokio::test]
    async fn test_login_failures() {
        let state = test_state().await;
        let user = seed_user(&state.pool, "a@x.com", "alpha", "p1").await;
        let service = AuthService::from_state(&state);

        let err = service.login(login_form("a@x.com", "wrong")).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::InvalidCredentials));

        let err = service.login(login_form("b@x.com", "p1")).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::InvalidCredentials));

        UserService::new(&state.pool).disable_user(&user.id).await.unwrap();
        let err = service.login(login_form("a@x.com", "p1")).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::InvalidCredentials));

        let err = service.login(login_form("", "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        assert_eq!(cached_refresh(&state, &user.id).await, None);
    }

    #[tokio::test]
    async fn test_refresh_rotates_tokens() {
        let state = test_state().await;
        let user = seed_user(&state.pool, "a@x.com", "p1nick", "p1").await;
        let service = AuthService::from_state(&state);

        let t1 = service.login(login_form("a@x.com", "p1")).await.unwrap().refresh_token;

        let rotated = service.refresh(Some(&t1)).await.unwrap();
        let t2 = rotated.refresh_token.clone();
        assert_ne!(t1, t2);
        assert_eq!(cached_refresh(&state, &user.id).await.as_deref(), Some(t2.as_str()));

        // The superseded token can no longer be used
        let err = service.refresh(Some(&t1)).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::TokenMismatch));

        // And the failed attempt did not disturb the live session
        assert!(service.refresh(Some(&t2)).await.is_ok());
    }

    #[tokio::test]
    async fn test_refresh_requires_cookie() {
        let state = test_state().await;
        let service = AuthService::from_state(&state);

        let err = service.refresh(None).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::MissingRefreshToken));

        let err = service.refresh(Some("")).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::MissingRefreshToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_bad_tokens() {
        let state = test_state().await;
        seed_user(&state.pool, "a@x.com", "alpha", "p1").await;
        let service = AuthService::from_state(&state);

        let err = service.refresh(Some("garbage")).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::InvalidToken));

        // An access token is not a refresh token
        let access = service.login(login_form("a@x.com", "p1")).await.unwrap().access_token;
        let err = service.refresh(Some(&access)).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_fails_for_disabled_user() {
        let state = test_state().await;
        let user = seed_user(&state.pool, "a@x.com", "alpha", "p1").await;
        let service = AuthService::from_state(&state);

        let t1 = service.login(login_form("a@x.com", "p1")).await.unwrap().refresh_token;
        UserService::new(&state.pool).disable_user(&user.id).await.unwrap();

        let err = service.refresh(Some(&t1)).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_refresh_rejects_token_not_in_cache() {
        let state = test_state().await;
        let user = seed_user(&state.pool, "a@x.com", "alpha", "p1").await;
        let service = AuthService::from_state(&state);

        // Validly signed but never registered in the cache
        let forged = state.jwt_utils.generate_refresh_token(&user).unwrap();
        let err = service.refresh(Some(&forged)).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::TokenMismatch));

        // A second login supersedes the first session
        let first = service.login(login_form("a@x.com", "p1")).await.unwrap().refresh_token;
        let second = service.login(login_form("a@x.com", "p1")).await.unwrap().refresh_token;
        let err = service.refresh(Some(&first)).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::TokenMismatch));
        assert!(service.refresh(Some(&second)).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_revokes_refresh_token() {
        let state = test_state().await;
        let user = seed_user(&state.pool, "a@x.com", "alpha", "p1").await;
        let service = AuthService::from_state(&state);

        let t1 = service.login(login_form("a@x.com", "p1")).await.unwrap().refresh_token;
        let caller = AuthenticatedUser {
            id: user.id.clone(),
            email: user.email.clone(),
        };

        service.logout(&caller).await.unwrap();
        assert_eq!(cached_refresh(&state, &user.id).await, None);

        // Idempotent
        service.logout(&caller).await.unwrap();

        let err = service.refresh(Some(&t1)).await.unwrap_err();
        assert_eq!(err.auth_kind(), Some(&AuthError::TokenMismatch));
    }

    #[tokio::test]
    async fn test_concurrent_refresh_has_one_winner() {
        let state = test_state().await;
        seed_user(&state.pool, "a@x.com", "alpha", "p1").await;

        let t1 = AuthService::from_state(&state)
            .login(login_form("a@x.com", "p1"))
            .await
            .unwrap()
            .refresh_token;

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = state.clone();
                let token = t1.clone();
                tokio::spawn(async move {
                    AuthService::from_state(&state)
                        .refresh(Some(&token))
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
