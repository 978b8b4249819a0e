//! Database repository for user management operations.
//!
//! Provides CRUD operations for user accounts. Users are never deleted;
//! they are disabled by clearing the `enabled` flag.

use crate::database::models::{CreateUser, User};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, name, nickname, email, password_hash, enabled, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new, enabled user in the database.
    ///
    /// Fails with a unique violation when the email is registered or the
    /// nickname is held by an enabled user.
    ///
    /// # Arguments
    /// * `user` - CreateUser DTO containing user details
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO users (id, name, nickname, email, password_hash, enabled, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(user.name)
            .bind(user.nickname)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves an enabled user by their unique identifier.
    pub async fn get_enabled_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? AND enabled = 1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves an enabled user by their email.
    ///
    /// # Returns
    /// `Some(User)` if found and enabled, `None` otherwise
    pub async fn find_enabled_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? AND enabled = 1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Retrieves an enabled user by their nickname.
    pub async fn find_enabled_user_by_nickname(&self, nickname: &str) -> Result<Option<User>> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE nickname = ? AND enabled = 1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(nickname)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Checks if an email is already registered, including disabled accounts.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Updates an enabled user's nickname.
    ///
    /// # Returns
    /// The updated user, or `None` if no enabled user has this ID
    pub async fn update_nickname(&self, id: &str, nickname: &str) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET nickname = ?, updated_at = ? WHERE id = ? AND enabled = 1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(nickname)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Soft-disables a user.
    ///
    /// # Returns
    /// `true` if an enabled user was disabled
    pub async fn disable_user(&self, id: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE users SET enabled = 0, updated_at = ? WHERE id = ? AND enabled = 1")
                .bind(Utc::now())
                .bind(id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_pool;
    use crate::errors::unique_violation_message;

    fn new_user(email: &str, nickname: &str) -> CreateUser {
        CreateUser {
            name: "name".to_string(),
            nickname: nickname.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let user = repo.create_user(new_user("a@x.com", "alpha")).await.unwrap();
        assert!(user.enabled);
        assert_eq!(user.email, "a@x.com");

        let found = repo.find_enabled_user_by_email("a@x.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id.clone()));

        let by_nickname = repo.find_enabled_user_by_nickname("alpha").await.unwrap();
        assert_eq!(by_nickname.map(|u| u.id), Some(user.id.clone()));

        assert!(repo.email_exists("a@x.com").await.unwrap());
        assert!(!repo.email_exists("b@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_disabled_user_is_hidden() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let user = repo.create_user(new_user("a@x.com", "alpha")).await.unwrap();
        assert!(repo.disable_user(&user.id).await.unwrap());
        assert!(!repo.disable_user(&user.id).await.unwrap());

        assert!(repo.find_enabled_user_by_email("a@x.com").await.unwrap().is_none());
        assert!(repo.get_enabled_user_by_id(&user.id).await.unwrap().is_none());

        let enabled: bool = sqlx::query_scalar("SELECT enabled FROM users WHERE id = ?")
            .bind(&user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!enabled);
        assert!(repo.email_exists("a@x.com").await.unwrap());
        assert!(repo.update_nickname(&user.id, "beta").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_nickname() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let user = repo.create_user(new_user("a@x.com", "alpha")).await.unwrap();
        let updated = repo.update_nickname(&user.id, "beta").await.unwrap().unwrap();
        assert_eq!(updated.nickname, "beta");
        assert!(updated.updated_at >= user.updated_at);

        assert!(repo.update_nickname("missing", "gamma").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_nickname_unique_among_enabled_users() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let first = repo.create_user(new_user("a@x.com", "same")).await.unwrap();

        let err = repo.create_user(new_user("b@x.com", "same")).await.unwrap_err();
        let message = unique_violation_message(&err).unwrap();
        assert!(message.contains("nickname"));

        let err = repo.create_user(new_user("a@x.com", "other")).await.unwrap_err();
        let message = unique_violation_message(&err).unwrap();
        assert!(message.contains("email"));

        let other = repo.create_user(new_user("c@x.com", "other")).await.unwrap();
        let err = repo.update_nickname(&other.id, "same").await.unwrap_err();
        assert!(unique_violation_message(&err).is_some());

        // A disabled user's nickname is free again
        repo.disable_user(&first.id).await.unwrap();
        let reused = repo.create_user(new_user("b@x.com", "same")).await.unwrap();
        assert_eq!(reused.nickname, "same");
    }
}
