//! Trait for the email-delivery collaborator

use async_trait::async_trait;

/// Trait for email delivery integration
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send the one-time code to a recipient address
    ///
    /// `expires_in_minutes` is included in the message body so the
    /// recipient knows the validity window. Returns a provider message id
    /// on success.
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;
}
