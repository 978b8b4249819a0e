//! Chat business logic service.

use crate::api::common::{PaginationFilter, SliceData};
use crate::database::models::{Chat, ChatMessage, CreateChatRequest};
use crate::errors::{ServiceError, ServiceResult, validation_message};
use crate::repositories::chat_repository::ChatRepository;
use crate::repositories::user_repository::UserRepository;
use sqlx::SqlitePool;
use validator::Validate;

pub struct ChatService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ChatService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores a message from `sender_id` to an enabled target user.
    pub async fn send(&self, sender_id: &str, request: CreateChatRequest) -> ServiceResult<Chat> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(validation_message(
                &validation_errors,
            )));
        }

        let user_repo = UserRepository::new(self.pool);
        if user_repo
            .get_enabled_user_by_id(&request.target_user_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("User", &request.target_user_id));
        }

        let chat = ChatRepository::new(self.pool)
            .create_chat(sender_id, &request.target_user_id, &request.message)
            .await?;
        Ok(chat)
    }

    /// Returns one page of the newest messages addressed to `target_user_id`.
    pub async fn find_recent_chat(
        &self,
        target_user_id: &str,
        pagination: &PaginationFilter,
    ) -> ServiceResult<SliceData<ChatMessage>> {
        if let Err(validation_errors) = pagination.validate() {
            return Err(ServiceError::validation(validation_message(
                &validation_errors,
            )));
        }

        let (content, has_next) = ChatRepository::new(self.pool)
            .find_recent_chat(target_user_id, pagination)
            .await?;

        Ok(SliceData::new(content, pagination, has_next))
    }

    /// Hides one of the sender's own messages.
    pub async fn delete(&self, sender_id: &str, chat_id: i64) -> ServiceResult<()> {
        if !ChatRepository::new(self.pool)
            .disable_chat(chat_id, sender_id)
            .await?
        {
            return Err(ServiceError::not_found("Chat", chat_id.to_string()));
        }
        Ok(())
    }
}
