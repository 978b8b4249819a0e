//! Main entry point for the Lucky Platform backend.
//!
//! This file initializes tracing, loads configuration, opens the database,
//! and serves the application router.

mod api;
mod app;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod state;
mod utils;

use anyhow::Context;
use auth::token_cache::{InMemoryTokenCache, run_purge_loop};
use config::Config;
use database::Database;
use state::AppState;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;

    let token_cache = Arc::new(InMemoryTokenCache::new());
    tokio::spawn(run_purge_loop(
        Arc::clone(&token_cache),
        config.token_cache_purge_interval(),
    ));

    let state = AppState::with_token_cache(db.pool().clone(), config.clone(), token_cache)?;

    let app = app::build_router(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting Lucky Platform server on port {}", config.server_port);
    axum::serve(listener, app).await.context("Server error")?;

    db.close().await;
    Ok(())
}
