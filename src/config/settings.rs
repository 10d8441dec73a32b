//! Application settings loaded from environment variables.

use std::env;

use crate::errors::{AppError, AppResult};

use super::constants::{
    DEFAULT_API_URL, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Unset until [`Config::require_jwt_secret`] resolves it
    jwt_secret: Option<String>,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Base URL of the customer API used by the CLI client
    pub api_url: String,
    /// Session token the CLI client sends with every request
    api_token: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The signing secret is read but not checked here; commands that sign
    /// or verify sessions call [`Config::require_jwt_secret`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            api_url: env::var("CUSTOMER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_token: env::var("CUSTOMER_API_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// Build a configuration from explicit values, defaulting everything else.
    ///
    /// Used by tests and embedders that do not read the environment.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: Some(jwt_secret.into()),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
        }
    }

    /// Resolve and check the signing secret.
    ///
    /// Debug builds fall back to a development secret when JWT_SECRET is unset.
    pub fn require_jwt_secret(mut self) -> AppResult<Self> {
        self.jwt_secret = Some(resolve_jwt_secret(
            self.jwt_secret.take(),
            cfg!(debug_assertions),
        )?);
        Ok(self)
    }

    /// Get JWT secret bytes for token signing/verification.
    ///
    /// Empty when the secret was never resolved.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_deref().unwrap_or_default().as_bytes()
    }

    /// Session token for the CLI client, if configured.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn resolve_jwt_secret(secret: Option<String>, allow_default: bool) -> AppResult<String> {
    let secret = match secret {
        Some(secret) => secret,
        None if allow_default => {
            tracing::warn!("JWT_SECRET not set, using insecure default for development");
            DEV_JWT_SECRET.to_string()
        }
        None => {
            return Err(AppError::config(
                "JWT_SECRET environment variable must be set in production",
            ))
        }
    };

    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(AppError::config(format!(
            "JWT_SECRET must be at least {} characters long",
            MIN_JWT_SECRET_LENGTH
        )));
    }

    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("postgres://user:pw@db/app", "a-very-long-secret-for-testing-only!");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("pw@db"));
        assert!(!debug.contains("a-very-long-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::new("sqlite::memory:", "a-very-long-secret-for-testing-only!");
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_secret_is_rejected_without_default() {
        let result = resolve_jwt_secret(None, false);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_secret_uses_dev_default() {
        assert_eq!(resolve_jwt_secret(None, true).unwrap(), DEV_JWT_SECRET);
    }

    #[test]
    fn test_short_secret_is_rejected() {
        let result = resolve_jwt_secret(Some("short".to_string()), true);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_client_settings_do_not_need_secret() {
        let config = Config {
            jwt_secret: None,
            ..Config::new("sqlite::memory:", "unused")
        };

        assert!(config.api_token().is_none());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.jwt_secret_bytes().is_empty());
    }
}
