//! MySQL connection pool management

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::InfraError;

/// Wrapper around the SQLx MySQL pool
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect to MySQL with the given configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfraError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| InfraError::Database(format!("Failed to connect to MySQL: {}", e)))?;

        info!(
            max_connections = config.max_connections,
            "Database connection pool established"
        );

        Ok(Self { pool })
    }

    /// Run a trivial query to confirm the pool is healthy
    pub async fn health_check(&self) -> Result<(), InfraError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| InfraError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}
