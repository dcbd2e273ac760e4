//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Router endpoint configuration
    pub router: RouterConfig,
}

/// Configuration for the remote agentic router endpoint
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Base URL of the router service, fixed at construction time
    pub base_url: String,
    /// Request timeout applied by the HTTP client (in seconds)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            router: RouterConfig {
                base_url: env::var("ROUTER_URL")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string()),
                request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(30),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        env::remove_var("ROUTER_URL");
        env::remove_var("REQUEST_TIMEOUT_SECS");
        let config = Config::from_env();
        assert_eq!(config.router.base_url, "http://localhost:8000");
        assert_eq!(config.router.request_timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        env::set_var("ROUTER_URL", "http://router.internal:9000");
        env::set_var("REQUEST_TIMEOUT_SECS", "5");
        let config = Config::from_env();
        assert_eq!(config.router.base_url, "http://router.internal:9000");
        assert_eq!(config.router.request_timeout_secs, 5);
        env::remove_var("ROUTER_URL");
        env::remove_var("REQUEST_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_falls_back_to_default() {
        env::set_var("REQUEST_TIMEOUT_SECS", "not-a-number");
        let config = Config::from_env();
        assert_eq!(config.router.request_timeout_secs, 30);
        env::remove_var("REQUEST_TIMEOUT_SECS");
    }
}
