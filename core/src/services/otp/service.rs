//! Main OTP service implementation

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use once_cell::sync::Lazy;
use rand::{rngs::OsRng, Rng};
use regex::Regex;
use std::sync::Arc;

use crate::domain::entities::otp_record::{OtpRecord, CODE_LENGTH};
use crate::domain::entities::user::UserAccount;
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::{OtpRepository, UserRepository};

use super::config::OtpServiceConfig;
use super::traits::Mailer;
use super::types::{SendOtpResult, VerifyOtpResult};

/// Outcome messages surfaced to callers. Domain rejections use the
/// `OtpError` display strings; these cover success and collaborator
/// failure. The UI matches on message content, so all of them are part of
/// the operation contract.
pub const MSG_SENT: &str = "OTP sent to your email";
pub const MSG_SEND_FAILED: &str = "Failed to generate OTP";
pub const MSG_VERIFIED: &str = "OTP verified successfully";
pub const MSG_VERIFY_FAILED: &str = "Failed to verify OTP. Please try again.";

// Basic local@domain.tld shape; anything else fails before a remote call.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// OTP service for issuing and verifying email one-time codes
///
/// All durable state lives in the injected repositories; the service keeps
/// no local cache, so every operation round-trips to the collaborators.
pub struct OtpService<O: OtpRepository, U: UserRepository, M: Mailer> {
    /// Document store holding OTP records
    otp_repository: Arc<O>,
    /// Identity collaborator for user accounts
    user_repository: Arc<U>,
    /// Email-delivery collaborator
    mailer: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O: OtpRepository, U: UserRepository, M: Mailer> OtpService<O, U, M> {
    /// Create a new OTP service
    pub fn new(
        otp_repository: Arc<O>,
        user_repository: Arc<U>,
        mailer: Arc<M>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            otp_repository,
            user_repository,
            mailer,
            config,
        }
    }

    /// Issue a one-time code and email it to the address
    ///
    /// This method:
    /// 1. Validates the email syntax (fail fast, no remote calls)
    /// 2. Generates a 6-digit code from the OS CSPRNG
    /// 3. Persists a new record with the configured expiry window
    /// 4. Hands the plaintext code to the mailer
    ///
    /// The record stays usable if the email fails after the write; there is
    /// no compensating delete.
    pub async fn send_otp(&self, email: &str) -> SendOtpResult {
        let email = email.to_lowercase();

        match self.try_send_otp(&email).await {
            Ok(result) => result,
            Err(DomainError::Otp(rejection)) => SendOtpResult::fail(rejection.to_string()),
            Err(e) => {
                tracing::error!(
                    email = email.as_str(),
                    error = %e,
                    event = "otp_send_failed",
                    "Failed to issue one-time code"
                );
                SendOtpResult::fail(MSG_SEND_FAILED)
            }
        }
    }

    async fn try_send_otp(&self, email: &str) -> DomainResult<SendOtpResult> {
        if !Self::is_valid_email(email) {
            tracing::warn!(event = "otp_send_rejected", "Malformed email address");
            return Err(OtpError::InvalidEmail.into());
        }

        let code = Self::generate_code();
        let record = OtpRecord::new(email, code, self.config.code_expiration_minutes);

        let record = self.otp_repository.create(record).await?;

        tracing::info!(
            email = email,
            otp_id = %record.id,
            event = "otp_generated",
            "Issued new one-time code"
        );

        let message_id = self
            .mailer
            .send_otp_email(email, &record.code, self.config.code_expiration_minutes)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to send OTP email: {}", e),
            })?;

        tracing::debug!(
            email = email,
            message_id = message_id.as_str(),
            event = "otp_email_sent",
            "One-time code handed to mailer"
        );

        Ok(SendOtpResult::ok(MSG_SENT, record.id))
    }

    /// Verify a one-time code against the most recently issued eligible record
    ///
    /// This method:
    /// 1. Lower-cases the email and selects the latest-expiring eligible record
    /// 2. Compares codes in constant time
    /// 3. On mismatch, atomically increments the attempt counter and burns
    ///    the record once the ceiling is reached
    /// 4. On match, marks the record used, then upserts the user account
    ///    and returns a verification marker token
    pub async fn verify_otp(&self, email: &str, code: &str) -> VerifyOtpResult {
        let email = email.to_lowercase();

        match self.try_verify_otp(&email, code).await {
            Ok(result) => result,
            Err(DomainError::Otp(rejection)) => VerifyOtpResult::fail(rejection.to_string()),
            Err(e) => {
                tracing::error!(
                    email = email.as_str(),
                    error = %e,
                    event = "otp_verify_failed",
                    "System error during code verification"
                );
                VerifyOtpResult::fail(MSG_VERIFY_FAILED)
            }
        }
    }

    async fn try_verify_otp(&self, email: &str, code: &str) -> DomainResult<VerifyOtpResult> {
        let record = match self.otp_repository.find_eligible(email, Utc::now()).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    email = email,
                    event = "otp_no_eligible_record",
                    "No eligible record for verification"
                );
                return Err(OtpError::NoEligibleCode.into());
            }
        };

        if !Self::codes_match(&record.code, code) {
            let attempts = self.otp_repository.record_failed_attempt(record.id).await?;

            if attempts >= self.config.max_attempts {
                // Burn the record; the correct code can no longer redeem it.
                self.otp_repository.mark_used(record.id).await?;
                tracing::warn!(
                    email = email,
                    otp_id = %record.id,
                    attempts = attempts,
                    event = "otp_burned",
                    "Attempt ceiling reached, record burned"
                );
                return Err(OtpError::MaxAttemptsExceeded.into());
            }

            tracing::warn!(
                email = email,
                otp_id = %record.id,
                attempts = attempts,
                event = "otp_mismatch",
                "Verification code mismatch"
            );
            return Err(OtpError::InvalidCode.into());
        }

        // Single-use: consume before touching the identity collaborator.
        self.otp_repository.mark_used(record.id).await?;

        tracing::info!(
            email = email,
            otp_id = %record.id,
            event = "otp_verified",
            "One-time code successfully verified"
        );

        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                let user = self
                    .user_repository
                    .create(UserAccount::from_email(email))
                    .await?;
                tracing::info!(
                    email = email,
                    user_id = %user.id,
                    event = "user_created",
                    "Created account on first successful verification"
                );
                user
            }
        };

        let token = format!("otp_verified_{}", user.id);
        Ok(VerifyOtpResult::ok(MSG_VERIFIED, token))
    }

    /// Delete every record whose expiry has passed, regardless of used state
    ///
    /// Best-effort maintenance sweep; callers get the number of records
    /// deleted, or zero when the sweep itself failed. Nothing schedules
    /// this internally; an external scheduler is expected to call it.
    pub async fn cleanup_expired_otps(&self) -> u64 {
        match self.otp_repository.delete_expired(Utc::now()).await {
            Ok(deleted) => {
                tracing::info!(
                    deleted = deleted,
                    event = "otp_cleanup",
                    "Expired OTP sweep completed"
                );
                deleted
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event = "otp_cleanup_failed",
                    "Expired OTP sweep failed"
                );
                0
            }
        }
    }

    /// Generate a 6-digit code from the OS CSPRNG
    ///
    /// Drawn uniformly from [100000, 999999], so there is no leading zero.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(100_000..1_000_000);
        format!("{}", code)
    }

    /// Check basic email syntax (`local@domain.tld`)
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }

    /// Compare two codes in constant time
    fn codes_match(stored: &str, provided: &str) -> bool {
        if stored.len() != provided.len() || provided.len() != CODE_LENGTH {
            return false;
        }
        constant_time_eq(stored.as_bytes(), provided.as_bytes())
    }
}
