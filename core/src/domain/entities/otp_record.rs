//! OTP record entity for email-based one-time password authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of failed verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for one-time codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Lifecycle state of an OTP record
///
/// `Expired` is derived from the clock, not stored. All states other than
/// `Active` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpState {
    /// Not used, not expired; eligible for verification
    Active,
    /// Used via a successful verification
    Consumed,
    /// Forced into used by attempt exhaustion
    Burned,
    /// Never used, but past its expiry instant
    Expired,
}

/// One issued OTP code bound to an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Recipient email address, stored lower-cased
    pub email: String,

    /// The 6-digit code, compared as an exact string
    pub code: String,

    /// Number of failed verification attempts against this record
    pub attempts: i32,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been consumed or burned
    pub is_used: bool,
}

impl OtpRecord {
    /// Creates a new OTP record for an email address
    ///
    /// The email is lower-cased so that later case-insensitive lookups
    /// match. The expiry is exactly `expiration_minutes` after creation.
    pub fn new(email: &str, code: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.to_lowercase(),
            code,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            is_used: false,
        }
    }

    /// Checks if the record has passed its expiry instant
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the record is eligible for verification
    ///
    /// A record is eligible only while it has not been used and has not
    /// expired.
    pub fn is_eligible(&self) -> bool {
        !self.is_used && !self.is_expired()
    }

    /// Derives the lifecycle state of the record
    ///
    /// A used record with the attempt ceiling reached was burned by
    /// exhaustion; a used record below the ceiling was consumed by a
    /// successful verification (success never increments the counter).
    pub fn state(&self) -> OtpState {
        if self.is_used {
            if self.attempts >= MAX_ATTEMPTS {
                OtpState::Burned
            } else {
                OtpState::Consumed
            }
        } else if self.is_expired() {
            OtpState::Expired
        } else {
            OtpState::Active
        }
    }

    /// Gets the number of remaining failed attempts before the record burns
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    /// Marks the record as used
    pub fn mark_as_used(&mut self) {
        self.is_used = true;
    }
}
