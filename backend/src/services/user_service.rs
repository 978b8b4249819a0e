//! User business logic service.
//!
//! Handles sign-up, credential checks and profile changes.

use crate::auth::errors::AuthError;
use crate::database::models::{CreateNewUser, CreateUser, User};
use crate::errors::{ServiceError, ServiceResult, unique_violation_message, validation_message};
use crate::repositories::user_repository::UserRepository;
use bcrypt::{DEFAULT_COST, hash, verify};
use sqlx::SqlitePool;
use validator::Validate;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Registers a new user with full validation.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - An email that is already registered
    /// - A nickname held by another enabled user
    ///
    /// The pre-checks give early answers; the unique indexes settle races
    /// between concurrent sign-ups.
    pub async fn sign_up(&self, create_user: CreateNewUser) -> ServiceResult<User> {
        if let Err(validation_errors) = create_user.validate() {
            return Err(ServiceError::validation(validation_message(
                &validation_errors,
            )));
        }

        let repo = UserRepository::new(self.pool);

        if repo.email_exists(&create_user.email).await? {
            return Err(ServiceError::already_exists("User", &create_user.email));
        }

        if repo
            .find_enabled_user_by_nickname(&create_user.nickname)
            .await?
            .is_some()
        {
            return Err(ServiceError::already_exists("Nickname", &create_user.nickname));
        }

        let password_hash = Self::hash_password(&create_user.password)?;

        let data = CreateUser {
            name: create_user.name,
            nickname: create_user.nickname,
            email: create_user.email,
            password_hash,
        };

        let email = data.email.clone();
        let nickname = data.nickname.clone();
        let user = repo
            .create_user(data)
            .await
            .map_err(|e| Self::conflict_or_storage(e, &email, &nickname))?;
        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Verifies an email/password pair against the enabled user holding the email.
    ///
    /// # Errors
    /// `AuthError::InvalidCredentials` when no enabled user has this email or
    /// the password does not match.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .find_enabled_user_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Changes a user's nickname.
    ///
    /// # Errors
    /// - `AlreadyExists` if an enabled user already uses the nickname
    /// - `NotFound` if the target user does not exist or is disabled
    pub async fn edit_nickname(&self, user_id: &str, new_nickname: &str) -> ServiceResult<User> {
        let new_nickname = new_nickname.trim();
        if new_nickname.is_empty() || new_nickname.chars().count() > 255 {
            return Err(ServiceError::validation(
                "nickname: Nickname must be between 1-255 characters",
            ));
        }

        let repo = UserRepository::new(self.pool);

        if repo
            .find_enabled_user_by_nickname(new_nickname)
            .await?
            .is_some()
        {
            return Err(ServiceError::already_exists("Nickname", new_nickname));
        }

        repo.update_nickname(user_id, new_nickname)
            .await
            .map_err(|e| Self::conflict_or_storage(e, user_id, new_nickname))?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    /// Retrieves an enabled user by ID.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the user doesn't exist or is disabled
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_enabled_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Soft-disables a user account.
    pub async fn disable_user(&self, id: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        if !repo.disable_user(id).await? {
            return Err(ServiceError::not_found("User", id));
        }
        tracing::info!("Disabled user {}", id);
        Ok(())
    }

    /// Maps a unique-index violation on `users` to `AlreadyExists`.
    fn conflict_or_storage(error: anyhow::Error, user: &str, nickname: &str) -> ServiceError {
        match unique_violation_message(&error) {
            Some(message) if message.contains("users.nickname") => {
                ServiceError::already_exists("Nickname", nickname)
            }
            Some(_) => ServiceError::already_exists("User", user),
            None => error.into(),
        }
    }

    fn hash_password(password: &str) -> ServiceResult<String> {
        hash(password, DEFAULT_COST)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash)
            .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {}", e)))
    }
}
