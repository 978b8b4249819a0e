//! Defines the HTTP routes for the sample document collection.

use super::handlers::{create_sample_data, get_sample_data, list_sample_data};
use crate::auth::middleware::jwt_auth;
use axum::{Router, middleware, routing::get};

pub fn sample_data_router() -> Router {
    Router::new()
        .route("/", get(list_sample_data).post(create_sample_data))
        .route("/{id}", get(get_sample_data))
        .layer(middleware::from_fn(jwt_auth))
}
