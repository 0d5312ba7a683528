//! User account entity owned by the identity collaborator.
//!
//! Verification creates a minimal account on first success; this is an
//! upsert side effect, not a full user-management subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A passenger booking rides
    Passenger,
    /// A driver fulfilling rides
    Driver,
}

/// User account looked up or created as a side effect of verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, lower-cased
    pub email: String,

    /// Display name shown in the client
    pub display_name: String,

    /// Role of the user
    pub role: UserRole,

    /// Whether the user's email has been verified
    pub is_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    /// Creates a minimal account for a freshly verified email address
    ///
    /// Defaults: display name from the email local part, passenger role,
    /// verified set since the account only exists because a code was
    /// proven.
    pub fn from_email(email: &str) -> Self {
        let email = email.to_lowercase();
        let display_name = email
            .split('@')
            .next()
            .unwrap_or(email.as_str())
            .to_string();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            role: UserRole::Passenger,
            is_verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the user is a driver
    pub fn is_driver(&self) -> bool {
        self.role == UserRole::Driver
    }
}
