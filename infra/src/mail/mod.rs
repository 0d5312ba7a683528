//! Mail module - email delivery implementations
//!
//! Provides two implementations of the core `Mailer` trait: an HTTP
//! mail-API client for production and a console mailer that only logs the
//! code for development.

use async_trait::async_trait;
use tracing::warn;

use mailotp_core::services::otp::Mailer;

use crate::config::MailConfig;

pub mod console;
pub mod http_api;

#[cfg(test)]
mod tests;

pub use console::ConsoleMailer;
pub use http_api::HttpApiMailer;

/// Mailer chosen at runtime from configuration
pub enum AnyMailer {
    HttpApi(HttpApiMailer),
    Console(ConsoleMailer),
}

#[async_trait]
impl Mailer for AnyMailer {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        match self {
            AnyMailer::HttpApi(mailer) => {
                mailer.send_otp_email(email, code, expires_in_minutes).await
            }
            AnyMailer::Console(mailer) => {
                mailer.send_otp_email(email, code, expires_in_minutes).await
            }
        }
    }
}

/// Create a mailer based on configuration
///
/// Falls back to the console mailer when the HTTP mailer cannot be
/// constructed from the given configuration.
pub fn create_mailer(config: &MailConfig) -> AnyMailer {
    match config.provider.as_str() {
        "http-api" => match HttpApiMailer::new(config.clone()) {
            Ok(mailer) => AnyMailer::HttpApi(mailer),
            Err(e) => {
                warn!(error = %e, "Failed to initialize HTTP mailer, falling back to console");
                AnyMailer::Console(ConsoleMailer::new())
            }
        },
        _ => AnyMailer::Console(ConsoleMailer::new()),
    }
}
