//! Unit tests for the mail module (no network)

use mailotp_core::services::otp::Mailer;

use crate::config::MailConfig;
use crate::mail::{create_mailer, AnyMailer, ConsoleMailer, HttpApiMailer};

#[test]
fn test_build_message_contains_code_and_expiry() {
    let (subject, html) = HttpApiMailer::build_message("482913", 5);
    assert_eq!(subject, "Your verification code");
    assert!(html.contains("482913"));
    assert!(html.contains("5 minutes"));
}

#[test]
fn test_http_mailer_rejects_empty_config() {
    let config = MailConfig {
        provider: "http-api".to_string(),
        ..MailConfig::default()
    };
    assert!(HttpApiMailer::new(config).is_err());
}

#[test]
fn test_create_mailer_defaults_to_console() {
    let mailer = create_mailer(&MailConfig::default());
    assert!(matches!(mailer, AnyMailer::Console(_)));
}

#[test]
fn test_create_mailer_falls_back_when_http_config_incomplete() {
    let config = MailConfig {
        provider: "http-api".to_string(),
        ..MailConfig::default()
    };
    let mailer = create_mailer(&config);
    assert!(matches!(mailer, AnyMailer::Console(_)));
}

#[tokio::test]
async fn test_console_mailer_returns_message_id() {
    let mailer = ConsoleMailer::new();
    let id = mailer
        .send_otp_email("a@b.com", "482913", 5)
        .await
        .unwrap();
    assert!(id.starts_with("console-"));
}
