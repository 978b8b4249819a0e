//! Module for core business logic services.
//!
//! Services validate input and orchestrate repository calls for users,
//! chat messages and the sample document collection.

pub mod chat_service;
pub mod sample_data_service;
pub mod user_service;
