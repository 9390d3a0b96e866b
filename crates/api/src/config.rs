//! Application configuration loaded from environment variables.

use std::time::Duration;

use orchestration::HttpCustomerClientConfig;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8080`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `CUSTOMER_SERVICE_URL` — customer service endpoint
///   (default: `"http://localhost:8081/customers"`)
/// - `CUSTOMER_SERVICE_TIMEOUT_SECS` — customer request timeout (default: `30`)
/// - `DATABASE_URL` — Postgres connection string; the in-memory store is
///   used when unset
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub customer_service_url: String,
    pub customer_service_timeout: Duration,
    pub database_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            customer_service_url: std::env::var("CUSTOMER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081/customers".to_string()),
            customer_service_timeout: Duration::from_secs(
                std::env::var("CUSTOMER_SERVICE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(30),
            ),
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the customer client configuration.
    pub fn customer_client(&self) -> HttpCustomerClientConfig {
        HttpCustomerClientConfig {
            base_url: self.customer_service_url.clone(),
            request_timeout: self.customer_service_timeout,
            ..HttpCustomerClientConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            customer_service_url: "http://localhost:8081/customers".to_string(),
            customer_service_timeout: Duration::from_secs(30),
            database_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.customer_service_url,
            "http://localhost:8081/customers"
        );
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_customer_client_config() {
        let config = Config {
            customer_service_url: "http://customers.internal/customers".to_string(),
            customer_service_timeout: Duration::from_secs(5),
            ..Config::default()
        };

        let client = config.customer_client();
        assert_eq!(client.base_url, "http://customers.internal/customers");
        assert_eq!(client.request_timeout, Duration::from_secs(5));
    }
}
