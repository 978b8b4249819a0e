//! Module for user account API endpoints.
//!
//! This module handles sign-up and changes a user makes to their own
//! account.

pub mod handlers;
pub mod routes;
