//! Turnstile configuration.
//!
//! Configuration is loaded from environment variables with sensible defaults.
//! The public-keys URL is derived from `AUTH_HOST` the way the auth service
//! publishes it, but can be overridden wholesale for deployments where the
//! endpoint lives elsewhere (and for tests pointing at a mock server).

use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default authentication service host.
pub const DEFAULT_AUTH_HOST: &str = "localhost";

/// Port the authentication service publishes its keys on.
pub const AUTH_SERVICE_PORT: u16 = 8000;

/// Default timeout for the outbound public-key fetch, in seconds.
pub const DEFAULT_KEY_FETCH_TIMEOUT_SECONDS: u64 = 10;

/// Maximum allowed key-fetch timeout in seconds.
///
/// The fetch happens inline with request handling on a cache miss, so an
/// excessively large timeout would stall client requests.
pub const MAX_KEY_FETCH_TIMEOUT_SECONDS: u64 = 60;

/// Turnstile configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Authentication service host (default: "localhost").
    pub auth_host: String,

    /// URL of the auth service's public-keys endpoint.
    pub public_keys_url: String,

    /// Timeout for the outbound public-key fetch.
    pub key_fetch_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid key fetch timeout configuration: {0}")]
    InvalidKeyFetchTimeout(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let auth_host = vars
            .get("AUTH_HOST")
            .cloned()
            .unwrap_or_else(|| DEFAULT_AUTH_HOST.to_string());

        let public_keys_url = vars
            .get("AUTH_PUBLIC_KEYS_URL")
            .cloned()
            .unwrap_or_else(|| {
                format!("http://{}:{}/public-keys", auth_host, AUTH_SERVICE_PORT)
            });

        // Parse key fetch timeout with validation
        let key_fetch_timeout_seconds =
            if let Some(value_str) = vars.get("KEY_FETCH_TIMEOUT_SECONDS") {
                let value: u64 = value_str.parse().map_err(|e| {
                    ConfigError::InvalidKeyFetchTimeout(format!(
                        "KEY_FETCH_TIMEOUT_SECONDS must be a valid positive integer, got '{}': {}",
                        value_str, e
                    ))
                })?;

                if value == 0 {
                    return Err(ConfigError::InvalidKeyFetchTimeout(
                        "KEY_FETCH_TIMEOUT_SECONDS must be greater than 0".to_string(),
                    ));
                }

                if value > MAX_KEY_FETCH_TIMEOUT_SECONDS {
                    return Err(ConfigError::InvalidKeyFetchTimeout(format!(
                        "KEY_FETCH_TIMEOUT_SECONDS must not exceed {} seconds, got {}",
                        MAX_KEY_FETCH_TIMEOUT_SECONDS, value
                    )));
                }

                value
            } else {
                DEFAULT_KEY_FETCH_TIMEOUT_SECONDS
            };

        Ok(Config {
            bind_address,
            auth_host,
            public_keys_url,
            key_fetch_timeout: Duration::from_secs(key_fetch_timeout_seconds),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_success_with_defaults() {
        let vars = HashMap::new();

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.auth_host, "localhost");
        assert_eq!(config.public_keys_url, "http://localhost:8000/public-keys");
        assert_eq!(
            config.key_fetch_timeout,
            Duration::from_secs(DEFAULT_KEY_FETCH_TIMEOUT_SECONDS)
        );
    }

    #[test]
    fn test_public_keys_url_derived_from_auth_host() {
        let vars = HashMap::from([("AUTH_HOST".to_string(), "auth.internal".to_string())]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.auth_host, "auth.internal");
        assert_eq!(
            config.public_keys_url,
            "http://auth.internal:8000/public-keys"
        );
    }

    #[test]
    fn test_public_keys_url_override_wins() {
        let vars = HashMap::from([
            ("AUTH_HOST".to_string(), "auth.internal".to_string()),
            (
                "AUTH_PUBLIC_KEYS_URL".to_string(),
                "https://auth.example.com/keys".to_string(),
            ),
        ]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.public_keys_url, "https://auth.example.com/keys");
    }

    #[test]
    fn test_custom_bind_address() {
        let vars = HashMap::from([("BIND_ADDRESS".to_string(), "127.0.0.1:9000".to_string())]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        assert_eq!(config.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_key_fetch_timeout_custom_value() {
        let vars = HashMap::from([("KEY_FETCH_TIMEOUT_SECONDS".to_string(), "5".to_string())]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        assert_eq!(config.key_fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_key_fetch_timeout_rejects_zero() {
        let vars = HashMap::from([("KEY_FETCH_TIMEOUT_SECONDS".to_string(), "0".to_string())]);

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidKeyFetchTimeout(msg)) if msg.contains("greater than 0"))
        );
    }

    #[test]
    fn test_key_fetch_timeout_rejects_too_large() {
        let vars = HashMap::from([("KEY_FETCH_TIMEOUT_SECONDS".to_string(), "61".to_string())]);

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidKeyFetchTimeout(msg)) if msg.contains("must not exceed 60"))
        );
    }

    #[test]
    fn test_key_fetch_timeout_accepts_max() {
        let vars = HashMap::from([("KEY_FETCH_TIMEOUT_SECONDS".to_string(), "60".to_string())]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");
        assert_eq!(config.key_fetch_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_key_fetch_timeout_rejects_non_numeric() {
        let vars = HashMap::from([(
            "KEY_FETCH_TIMEOUT_SECONDS".to_string(),
            "ten-seconds".to_string(),
        )]);

        let result = Config::from_vars(&vars);
        assert!(
            matches!(result, Err(ConfigError::InvalidKeyFetchTimeout(msg)) if msg.contains("must be a valid positive integer"))
        );
    }
}
