//! Defines the HTTP routes for chat messages.

use super::handlers::{delete_chat, get_recent_chat, send_chat};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, get},
};

pub fn chat_router() -> Router {
    Router::new()
        .route("/", get(get_recent_chat).post(send_chat))
        .route("/{id}", delete(delete_chat))
        .layer(middleware::from_fn(jwt_auth))
}
