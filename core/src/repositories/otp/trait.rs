//! OTP repository trait defining the interface for OTP record persistence.
//!
//! The document store holding OTP records is an external collaborator; this
//! trait is the abstraction boundary between the domain layer and whatever
//! backend implements it. Implementations must treat the store as the
//! single source of truth, and the service layer never caches records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

/// Repository trait for OTP record persistence operations
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a newly issued OTP record
    ///
    /// Multiple outstanding records may exist for the same email; no
    /// uniqueness constraint is enforced.
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Find the eligible record for an email address, if any
    ///
    /// Selection rule: `email` equality (callers pass a lower-cased value),
    /// `is_used = false`, `expires_at > now`, ordered by `expires_at`
    /// descending, first result only. The most recently issued still-valid
    /// code wins when several are outstanding.
    async fn find_eligible(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Atomically increment the failed-attempt counter for a record
    ///
    /// Returns the post-increment count. Atomicity is part of the contract:
    /// two concurrent failed verifications must not observe the same
    /// pre-increment value.
    async fn record_failed_attempt(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Mark a record as used, making it permanently ineligible
    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError>;

    /// Delete all records whose expiry has passed, regardless of used state
    ///
    /// Best-effort sweep: implementations log and skip per-record failures
    /// rather than aborting. Returns the number of records deleted.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
