//! Defines the HTTP routes for user accounts.
//!
//! Sign-up is public; everything under `/me` acts on the authenticated caller.

use super::handlers::{disable_me, edit_nickname, sign_up};
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{delete, post, put},
};

pub fn user_router() -> Router {
    Router::new()
        .route("/", post(sign_up))
        .route(
            "/me/nickname",
            put(edit_nickname).layer(middleware::from_fn(jwt_auth)),
        )
        .route("/me", delete(disable_me).layer(middleware::from_fn(jwt_auth)))
}
