//! Data access layer.
//!
//! Each repository wraps the shared `SqlitePool` and owns the SQL for a
//! single table.

pub mod chat_repository;
pub mod sample_data_repository;
pub mod user_repository;
