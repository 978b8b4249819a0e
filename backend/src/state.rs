//! Shared application state handed to every request.

#[cfg(test)]
use crate::auth::token_cache::InMemoryTokenCache;
use crate::auth::token_cache::TokenCache;
use crate::config::Config;
use crate::errors::ServiceResult;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub jwt_utils: Arc<JwtUtils>,
    pub token_cache: Arc<dyn TokenCache>,
}

impl AppState {
    /// Builds the state with a fresh process-local token cache.
    #[cfg(test)]
    pub fn new(pool: SqlitePool, config: Config) -> ServiceResult<Self> {
        Self::with_token_cache(pool, config, Arc::new(InMemoryTokenCache::new()))
    }

    pub fn with_token_cache(
        pool: SqlitePool,
        config: Config,
        token_cache: Arc<dyn TokenCache>,
    ) -> ServiceResult<Self> {
        let jwt_utils = JwtUtils::new(&config)?;
        Ok(Self {
            pool,
            config: Arc::new(config),
            jwt_utils: Arc::new(jwt_utils),
            token_cache,
        })
    }
}
