//! Result types for the OTP service operations
//!
//! Both operations surface every outcome, including collaborator failures,
//! as one of these shapes with a fixed human-readable message. Callers
//! never see a raw error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of issuing a one-time code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResult {
    /// Whether the code was persisted and handed to the mailer
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Identifier of the stored record, on success
    pub otp_id: Option<Uuid>,
}

impl SendOtpResult {
    pub fn ok(message: impl Into<String>, otp_id: Uuid) -> Self {
        Self {
            success: true,
            message: message.into(),
            otp_id: Some(otp_id),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            otp_id: None,
        }
    }
}

/// Result of verifying a one-time code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResult {
    /// Whether the code matched an eligible record
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Caller-interpreted verification marker, on success
    pub token: Option<String>,
}

impl VerifyOtpResult {
    pub fn ok(message: impl Into<String>, token: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            token: Some(token),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
        }
    }
}
