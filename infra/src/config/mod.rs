//! Configuration management for infrastructure services
//!
//! Handles database connection settings, mail provider credentials, and the
//! cleanup task schedule. Everything loads from environment variables with
//! `.env` file support via dotenvy.

use serde::{Deserialize, Serialize};

use crate::InfraError;

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MySQL connection URL
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Minimum number of pooled connections
    pub min_connections: u32,
    /// Seconds to wait when acquiring a connection
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mysql://localhost:3306/mailotp".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 5,
        }
    }
}

impl DatabaseConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| InfraError::Config("DATABASE_URL not set".to_string()))?;

        Ok(Self {
            url,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            min_connections: env_or("DATABASE_MIN_CONNECTIONS", 1),
            acquire_timeout_secs: env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 5),
        })
    }
}

/// Mail provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Mail provider ("http-api", "console")
    pub provider: String,
    /// HTTP mail API endpoint
    pub api_url: String,
    /// API bearer token
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: "console".to_string(),
            api_url: String::new(),
            api_key: String::new(),
            from_address: "no-reply@mailotp.dev".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl MailConfig {
    /// Create configuration from environment variables
    ///
    /// `MAIL_PROVIDER=console` needs no further variables; `http-api`
    /// requires the endpoint, key, and sender address.
    pub fn from_env() -> Result<Self, InfraError> {
        let provider =
            std::env::var("MAIL_PROVIDER").unwrap_or_else(|_| "console".to_string());

        if provider == "console" {
            return Ok(Self {
                provider,
                ..Self::default()
            });
        }

        let api_url = std::env::var("MAIL_API_URL")
            .map_err(|_| InfraError::Config("MAIL_API_URL not set".to_string()))?;
        let api_key = std::env::var("MAIL_API_KEY")
            .map_err(|_| InfraError::Config("MAIL_API_KEY not set".to_string()))?;
        let from_address = std::env::var("MAIL_FROM_ADDRESS")
            .map_err(|_| InfraError::Config("MAIL_FROM_ADDRESS not set".to_string()))?;

        Ok(Self {
            provider,
            api_url,
            api_key,
            from_address,
            request_timeout_secs: env_or("MAIL_REQUEST_TIMEOUT_SECS", 30),
        })
    }
}

/// Infrastructure configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureConfig {
    /// Database configuration
    pub database: DatabaseConfig,
    /// Mail provider configuration
    pub mail: MailConfig,
}

impl InfrastructureConfig {
    /// Load the full configuration, reading `.env` first if present
    pub fn load() -> Result<Self, InfraError> {
        dotenvy::dotenv().ok();
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            mail: MailConfig::from_env()?,
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout_secs, 5);
    }

    #[test]
    fn test_mail_config_defaults_to_console() {
        let config = MailConfig::default();
        assert_eq!(config.provider, "console");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
