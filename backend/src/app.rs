//! Assembles the full HTTP application from the per-domain routers.

use crate::api;
use crate::api::common::ApiResponse;
use crate::auth;
use crate::state::AppState;
use axum::{Extension, Router, response::Json, routing::get};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth/v1", auth::routes::auth_router())
        .nest("/api/v1/users", api::user::routes::user_router())
        .nest("/api/v1/chat", api::chat::routes::chat_router())
        .nest(
            "/api/v1/sample-data",
            api::sample_data::routes::sample_data_router(),
        )
        .layer(Extension(state))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Lucky Platform Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to Lucky Platform API",
    ))
}
