//! HTTP mail-API client
//!
//! Sends the OTP message through a JSON mail API (SendGrid-style: one POST
//! per message, bearer authentication, provider message id in the
//! response).

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use mailotp_core::services::otp::Mailer;

use crate::config::MailConfig;
use crate::InfraError;

/// HTTP mail-API mailer
pub struct HttpApiMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpApiMailer {
    /// Create a new HTTP mailer
    pub fn new(config: MailConfig) -> Result<Self, InfraError> {
        if config.api_url.is_empty() {
            return Err(InfraError::Config("MAIL_API_URL is empty".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(InfraError::Config("MAIL_API_KEY is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfraError::Mail(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        Self::new(MailConfig::from_env()?)
    }

    /// Build the subject and HTML body for an OTP message
    pub fn build_message(code: &str, expires_in_minutes: i64) -> (String, String) {
        let subject = "Your verification code".to_string();
        let html = format!(
            "<p>Your verification code is <strong>{}</strong>.</p>\
             <p>It expires in {} minutes. If you did not request it, you can ignore this email.</p>",
            code, expires_in_minutes
        );
        (subject, html)
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let (subject, html) = Self::build_message(code, expires_in_minutes);

        let body = json!({
            "from": self.config.from_address,
            "to": email,
            "subject": subject,
            "html": html,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Mail API request failed");
                format!("Mail API request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = text.as_str(), "Mail API rejected the message");
            return Err(format!("Mail API returned {}", status));
        }

        let message_id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_str().map(String::from)))
            .unwrap_or_else(|| format!("http-{}", uuid::Uuid::new_v4()));

        debug!(message_id = message_id.as_str(), "Mail API accepted the message");
        Ok(message_id)
    }
}
