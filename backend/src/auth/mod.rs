//! Authentication module for managing sessions and access control.
//!
//! This module provides the public interface for authentication-related
//! functionality such as login, token rotation, logout and the
//! authorization middleware.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod token_cache;
