//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub nickname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sign-up payload as received from the client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNewUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1-255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Nickname must be between 1-255 characters"
    ))]
    pub nickname: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Row to insert once the password has been hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EditNicknameRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Nickname must be between 1-255 characters"
    ))]
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Chat {
    pub id: i64,
    pub user_id: String,
    pub target_user_id: String,
    pub message: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Chat row joined with its sender, as shown in a conversation log.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub chat_id: i64,
    pub sender_id: String,
    pub sender_nickname: Option<String>,
    pub target_user_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateChatRequest {
    #[validate(length(min = 1, message = "Target user ID is required"))]
    pub target_user_id: String,

    #[validate(length(
        min = 1,
        max = 2000,
        message = "Message must be between 1-2000 characters"
    ))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SampleDataInfo {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub count: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateSampleData {
    #[validate(length(min = 1, max = 255, message = "ID must be between 1-255 characters"))]
    pub id: Option<String>,
    pub name: Option<String>,
    #[validate(email(message = "Must be a valid email"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub count: Option<i32>,
}
