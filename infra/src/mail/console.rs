//! Console mailer for development
//!
//! Logs the code instead of delivering it. Never use outside development:
//! the plaintext code lands in the log stream.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use mailotp_core::services::otp::Mailer;

/// Mailer that logs the code via tracing
pub struct ConsoleMailer;

impl ConsoleMailer {
    /// Create a new console mailer
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        info!(
            email = email,
            code = code,
            expires_in_minutes = expires_in_minutes,
            "Console mailer: would deliver verification code"
        );
        Ok(format!("console-{}", Uuid::new_v4()))
    }
}
