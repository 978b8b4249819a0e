//! Handler functions for chat message API endpoints.

use crate::api::common::{ApiResponse, PaginationFilter, SliceData, service_error_to_http};
use crate::auth::models::AuthenticatedUser;
use crate::database::models::{Chat, ChatMessage, CreateChatRequest};
use crate::services::chat_service::ChatService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, Path, Query},
    http::StatusCode,
};
use serde::Deserialize;

/// Query string of the recent-chat endpoint
#[derive(Debug, Deserialize)]
pub struct RecentChatQuery {
    /// Whose conversation to read; defaults to the caller
    pub target_user_id: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Retrieves the newest messages addressed to a user.
#[axum::debug_handler]
pub async fn get_recent_chat(
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Query(query): Query<RecentChatQuery>,
) -> Result<Json<ApiResponse<SliceData<ChatMessage>>>, (StatusCode, String)> {
    let target_user_id = query.target_user_id.unwrap_or(caller.id);
    let pagination = PaginationFilter {
        page: query.page,
        per_page: query.per_page,
    };

    let slice = ChatService::new(&state.pool)
        .find_recent_chat(&target_user_id, &pagination)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        slice,
        "Chat retrieved successfully",
    )))
}

/// Sends a message as the caller.
#[axum::debug_handler]
pub async fn send_chat(
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateChatRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Chat>>), (StatusCode, String)> {
    let chat = ChatService::new(&state.pool)
        .send(&caller.id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(chat, "Chat sent successfully")),
    ))
}

/// Hides one of the caller's messages.
#[axum::debug_handler]
pub async fn delete_chat(
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, (StatusCode, String)> {
    ChatService::new(&state.pool)
        .delete(&caller.id, id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success((), "Chat deleted successfully")))
}
