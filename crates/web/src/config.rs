//! Web front-end configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VENDORA_API_URL` - Backend REST API base URL
//!   (default: `http://localhost:8080/api`)
//! - `VENDORA_HOST` - Bind address (default: 127.0.0.1)
//! - `VENDORA_PORT` - Listen port (default: 3000)
//! - `VENDORA_BASE_URL` - Public URL for the front end
//!   (default: `http://localhost:3000`; https enables secure cookies)
//! - `VENDORA_USE_FIXTURES` - Serve canned in-memory data instead of
//!   calling the backend (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default backend API base URL when `VENDORA_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Front-end application configuration.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// Backend REST API base URL.
    pub api_base_url: String,
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public base URL for the front end.
    pub base_url: String,
    /// Serve fixture data instead of calling the backend.
    pub use_fixtures: bool,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag.
    pub sentry_environment: Option<String>,
    /// Sentry tracing sample rate.
    pub sentry_traces_sample_rate: f32,
}

impl MarketplaceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("VENDORA_API_URL", DEFAULT_API_URL);
        let host = get_env_or_default("VENDORA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VENDORA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VENDORA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VENDORA_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("VENDORA_BASE_URL", "http://localhost:3000");
        let use_fixtures = get_bool_env("VENDORA_USE_FIXTURES")?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_base_url,
            host,
            port,
            base_url,
            use_fixtures,
            sentry_dsn,
            sentry_environment,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for tests: fixture-backed, bound to an ephemeral port.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            use_fixtures: true,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean environment variable (`1`, `true`, `yes` enable).
fn get_bool_env(key: &str) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(false),
        Ok(value) => match value.to_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got {other}"),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = MarketplaceConfig::for_tests();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 0);
    }

    #[test]
    fn test_defaults() {
        let config = MarketplaceConfig::for_tests();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert!(config.use_fixtures);
        assert!(config.sentry_dsn.is_none());
    }
}
