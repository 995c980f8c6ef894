//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Process-wide JWT signing secret.
    pub secret_key: String,
    /// Access token time-to-live, in minutes.
    pub token_ttl_minutes: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `GATEWAY_ADDR` | Server bind address | `127.0.0.1:8790` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:voicegate.db?mode=rwc` |
    /// | `SECRET_KEY` | JWT signing secret | (required) |
    /// | `ACCESS_TOKEN_TTL_MINUTES` | Token time-to-live | `15` |
    ///
    /// The Vapi credentials are read separately by
    /// [`vapi_client::VapiConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("GATEWAY_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8790".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:voicegate.db?mode=rwc".to_string());

        let secret_key = env::var("SECRET_KEY").map_err(|_| ConfigError::MissingSecretKey)?;

        let token_ttl_minutes = env::var("ACCESS_TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        Ok(Self {
            addr,
            database_url,
            secret_key,
            token_ttl_minutes,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid GATEWAY_ADDR format")]
    InvalidAddr,

    #[error("SECRET_KEY environment variable is required")]
    MissingSecretKey,
}
