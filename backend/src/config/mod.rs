//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, and the lifetimes of issued tokens.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    /// Access token lifetime.
    pub jwt_expires_in_seconds: u64,
    /// Refresh token lifetime, used for the JWT, the cookie and the cache entry.
    pub jwt_refresh_expiration_milliseconds: u64,
    /// How often expired refresh tokens are dropped from the cache.
    pub token_cache_purge_interval_seconds: u64,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "1800".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let jwt_refresh_expiration_milliseconds = env::var("JWT_REFRESH_EXPIRATION_MILLISECONDS")
            .unwrap_or_else(|_| "1209600000".to_string())
            .parse::<u64>()
            .context("JWT_REFRESH_EXPIRATION_MILLISECONDS must be a valid number")?;

        let token_cache_purge_interval_seconds = env::var("TOKEN_CACHE_PURGE_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .context("TOKEN_CACHE_PURGE_INTERVAL_SECONDS must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            jwt_refresh_expiration_milliseconds,
            token_cache_purge_interval_seconds,
            server_port,
        })
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.jwt_expires_in_seconds)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_millis(self.jwt_refresh_expiration_milliseconds)
    }

    pub fn token_cache_purge_interval(&self) -> Duration {
        Duration::from_secs(self.token_cache_purge_interval_seconds.max(1))
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for tests backed by an in-memory database.
    pub fn for_tests() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-secret-key-12345".to_string(),
            jwt_expires_in_seconds: 1800,
            jwt_refresh_expiration_milliseconds: 60_000,
            token_cache_purge_interval_seconds: 60,
            server_port: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttls() {
        let config = Config::for_tests();
        assert_eq!(config.access_token_ttl(), Duration::from_secs(1800));
        assert_eq!(config.refresh_token_ttl(), Duration::from_secs(60));

        let mut config = config;
        config.token_cache_purge_interval_seconds = 0;
        assert_eq!(config.token_cache_purge_interval(), Duration::from_secs(1));
    }
}
