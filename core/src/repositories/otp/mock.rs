//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// In-memory OTP repository for testing
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
    should_fail: bool,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a mock repository whose every operation fails
    pub fn failing() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: true,
        }
    }

    /// Seed a record directly, bypassing the service flow
    pub async fn insert(&self, record: OtpRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Fetch a record by id for assertions
    pub async fn get(&self, id: Uuid) -> Option<OtpRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "mock otp repository failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_eligible(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError> {
        self.check_failure()?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.email == email && !r.is_used && r.expires_at > now)
            .max_by_key(|r| r.expires_at)
            .cloned())
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "OtpRecord".to_string(),
        })?;
        record.attempts += 1;
        Ok(record.attempts)
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| DomainError::NotFound {
            resource: "OtpRecord".to_string(),
        })?;
        record.is_used = true;
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.expires_at >= now);
        Ok((before - records.len()) as u64)
    }
}
