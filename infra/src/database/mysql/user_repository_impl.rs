//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mailotp_core::domain::entities::user::{UserAccount, UserRole};
use mailotp_core::errors::DomainError;
use mailotp_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn role_to_str(role: UserRole) -> &'static str {
        match role {
            UserRole::Passenger => "passenger",
            UserRole::Driver => "driver",
        }
    }

    fn role_from_str(value: &str) -> Result<UserRole, DomainError> {
        match value {
            "passenger" => Ok(UserRole::Passenger),
            "driver" => Ok(UserRole::Driver),
            other => Err(DomainError::Internal {
                message: format!("Unknown user role: {}", other),
            }),
        }
    }

    /// Convert a database row to a UserAccount entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<UserAccount, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let role: String = row.try_get("role").map_err(|e| DomainError::Internal {
            message: format!("Failed to get role: {}", e),
        })?;

        Ok(UserAccount {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get display_name: {}", e),
                })?,
            role: Self::role_from_str(&role)?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_verified: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let query = r#"
            SELECT id, email, display_name, role, is_verified, created_at, updated_at
            FROM users
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query user: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: UserAccount) -> Result<UserAccount, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, display_name, role, is_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(Self::role_to_str(user.role))
            .bind(user.is_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create user: {}", e),
            })?;

        Ok(user)
    }
}
