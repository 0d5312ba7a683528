//! MySQL implementation of the OtpRepository trait.
//!
//! OTP records live in the `otp_codes` table. The failed-attempt increment
//! is a single UPDATE so MySQL's row-level locking serializes concurrent
//! failures; two racing verifications cannot observe the same pre-increment
//! value.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::{error, warn};
use uuid::Uuid;

use mailotp_core::domain::entities::otp_record::OtpRecord;
use mailotp_core::errors::DomainError;
use mailotp_core::repositories::OtpRepository;

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL OTP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an OtpRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(OtpRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid record UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            attempts: row.try_get("attempts").map_err(|e| DomainError::Internal {
                message: format!("Failed to get attempts: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            is_used: row.try_get("is_used").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_used: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let query = r#"
            INSERT INTO otp_codes (
                id, email, code, attempts, created_at, expires_at, is_used
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.attempts)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.is_used)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to store OTP record: {}", e),
            })?;

        Ok(record)
    }

    async fn find_eligible(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let query = r#"
            SELECT id, email, code, attempts, created_at, expires_at, is_used
            FROM otp_codes
            WHERE email = ? AND is_used = FALSE AND expires_at > ?
            ORDER BY expires_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query OTP records: {}", e),
            })?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError> {
        let result = sqlx::query("UPDATE otp_codes SET attempts = attempts + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to increment attempts: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OtpRecord".to_string(),
            });
        }

        let row = sqlx::query("SELECT attempts FROM otp_codes WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read attempt count: {}", e),
            })?;

        row.try_get("attempts").map_err(|e| DomainError::Internal {
            message: format!("Failed to get attempts: {}", e),
        })
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE otp_codes SET is_used = TRUE WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to mark record used: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OtpRecord".to_string(),
            });
        }

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let rows = sqlx::query("SELECT id FROM otp_codes WHERE expires_at < ?")
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query expired records: {}", e),
            })?;

        let mut deleted = 0u64;
        for row in rows {
            let id: String = match row.try_get("id") {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "Skipping expired record with unreadable id");
                    continue;
                }
            };

            // Best-effort sweep: one bad record must not halt the rest.
            match sqlx::query("DELETE FROM otp_codes WHERE id = ?")
                .bind(&id)
                .execute(&self.pool)
                .await
            {
                Ok(result) => deleted += result.rows_affected(),
                Err(e) => {
                    error!(otp_id = id.as_str(), error = %e, "Failed to delete expired record");
                }
            }
        }

        Ok(deleted)
    }
}
