//! Module for chat message API endpoints.

pub mod handlers;
pub mod routes;
