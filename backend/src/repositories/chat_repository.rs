//! Database repository for chat messages.

use crate::api::common::PaginationFilter;
use crate::database::models::{Chat, ChatMessage};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// Repository for chat database operations.
pub struct ChatRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> ChatRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores a chat message sent by `user_id` to `target_user_id`.
    pub async fn create_chat(
        &self,
        user_id: &str,
        target_user_id: &str,
        message: &str,
    ) -> Result<Chat> {
        let chat = sqlx::query_as::<_, Chat>(
            r#"
            INSERT INTO chats (user_id, target_user_id, message, enabled, created_at)
            VALUES (?, ?, ?, 1, ?)
            RETURNING id, user_id, target_user_id, message, enabled, created_at
            "#,
        )
        .bind(user_id)
        .bind(target_user_id)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(chat)
    }

    /// Fetches the most recent enabled chats for a target user.
    ///
    /// Reads one row past the page so the caller can tell whether another
    /// page exists. Rowid order is creation order.
    pub async fn find_recent_chat(
        &self,
        target_user_id: &str,
        pagination: &PaginationFilter,
    ) -> Result<(Vec<ChatMessage>, bool)> {
        let page_size = pagination.limit();

        let mut chats = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT
            c.id as chat_id,
            c.user_id as sender_id,
            u.nickname as sender_nickname,
            c.target_user_id,
            c.message,
            c.created_at
            FROM chats c
            LEFT JOIN users u ON c.user_id = u.id
            WHERE c.enabled = 1 AND c.target_user_id = ?
            ORDER BY c.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(target_user_id)
        .bind((page_size + 1) as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let has_next = chats.len() as u64 > page_size;
        if has_next {
            chats.truncate(page_size as usize);
        }

        Ok((chats, has_next))
    }

    /// Hides a chat message from conversation logs.
    pub async fn disable_chat(&self, id: i64, user_id: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE chats SET enabled = 0 WHERE id = ? AND user_id = ? AND enabled = 1")
                .bind(id)
                .bind(user_id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateUser;
    use crate::database::test_support::memory_pool;
    use crate::repositories::user_repository::UserRepository;

    async fn create_user(pool: &SqlitePool, email: &str, nickname: &str) -> String {
        UserRepository::new(pool)
            .create_user(CreateUser {
                name: "name".to_string(),
                nickname: nickname.to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_find_recent_chat_slices() {
        let pool = memory_pool().await;
        let sender = create_user(&pool, "s@x.com", "sender").await;
        let target = create_user(&pool, "t@x.com", "target").await;
        let repo = ChatRepository::new(&pool);

        for i in 0..5 {
            repo.create_chat(&sender, &target, &format!("message {}", i))
                .await
                .unwrap();
        }
        // Other conversations do not leak in
        repo.create_chat(&target, &sender, "reply").await.unwrap();

        let first = PaginationFilter {
            page: Some(1),
            per_page: Some(2),
        };
        let (chats, has_next) = repo.find_recent_chat(&target, &first).await.unwrap();
        assert!(has_next);
        assert_eq!(
            chats.iter().map(|c| c.message.as_str()).collect::<Vec<_>>(),
            vec!["message 4", "message 3"]
        );
        assert_eq!(chats[0].sender_nickname.as_deref(), Some("sender"));

        let last = PaginationFilter {
            page: Some(3),
            per_page: Some(2),
        };
        let (chats, has_next) = repo.find_recent_chat(&target, &last).await.unwrap();
        assert!(!has_next);
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].message, "message 0");

        let exact = PaginationFilter {
            page: Some(1),
            per_page: Some(5),
        };
        let (chats, has_next) = repo.find_recent_chat(&target, &exact).await.unwrap();
        assert!(!has_next);
        assert_eq!(chats.len(), 5);
    }

    #[tokio::test]
    async fn test_disabled_chat_is_hidden() {
        let pool = memory_pool().await;
        let sender = create_user(&pool, "s@x.com", "sender").await;
        let target = create_user(&pool, "t@x.com", "target").await;
        let repo = ChatRepository::new(&pool);

        let chat = repo.create_chat(&sender, &target, "oops").await.unwrap();
        assert!(!repo.disable_chat(chat.id, &target).await.unwrap());
        assert!(repo.disable_chat(chat.id, &sender).await.unwrap());

        let (chats, has_next) = repo
            .find_recent_chat(&target, &PaginationFilter::default())
            .await
            .unwrap();
        assert!(chats.is_empty());
        assert!(!has_next);
    }
}
