//! Module for the sample document API endpoints.

pub mod handlers;
pub mod routes;
