//! Unit tests for the OTP service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::otp_record::{OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
use crate::domain::entities::user::{UserAccount, UserRole};
use crate::errors::OtpError;
use crate::repositories::otp::MockOtpRepository;
use crate::repositories::user::{MockUserRepository, UserRepository};
use crate::services::otp::service::{MSG_SEND_FAILED, MSG_SENT, MSG_VERIFIED, MSG_VERIFY_FAILED};
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::MockMailer;

type TestService = OtpService<MockOtpRepository, MockUserRepository, MockMailer>;

fn make_service(
    mailer_fails: bool,
) -> (
    Arc<MockOtpRepository>,
    Arc<MockUserRepository>,
    Arc<MockMailer>,
    TestService,
) {
    let otp_repo = Arc::new(MockOtpRepository::new());
    let user_repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockMailer::new(mailer_fails));
    let service = OtpService::new(
        otp_repo.clone(),
        user_repo.clone(),
        mailer.clone(),
        OtpServiceConfig::default(),
    );
    (otp_repo, user_repo, mailer, service)
}

#[tokio::test]
async fn test_send_otp_success() {
    let (otp_repo, _, mailer, service) = make_service(false);

    let result = service.send_otp("a@b.com").await;
    assert!(result.success);
    assert_eq!(result.message, MSG_SENT);

    let otp_id = result.otp_id.expect("otp id on success");
    let record = otp_repo.get(otp_id).await.unwrap();
    assert_eq!(record.email, "a@b.com");
    assert_eq!(record.attempts, 0);
    assert!(!record.is_used);
    assert_eq!(
        record.expires_at,
        record.created_at + Duration::minutes(DEFAULT_EXPIRATION_MINUTES)
    );

    // The mailed code is the stored code
    assert_eq!(mailer.get_sent_code("a@b.com"), Some(record.code));
}

#[tokio::test]
async fn test_send_otp_invalid_email_makes_no_remote_calls() {
    let (otp_repo, _, mailer, service) = make_service(false);

    for email in ["not-an-email", "missing@tld", "a b@c.com", "@c.com"] {
        let result = service.send_otp(email).await;
        assert!(!result.success, "expected rejection for {email}");
        assert_eq!(result.message, OtpError::InvalidEmail.to_string());
        assert!(result.otp_id.is_none());
    }

    assert_eq!(otp_repo.len().await, 0);
    assert!(mailer.sent_messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_send_otp_code_format_invariant() {
    for _ in 0..100 {
        let code = TestService::generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let num: u32 = code.parse().unwrap();
        assert!((100_000..=999_999).contains(&num));
    }
}

#[tokio::test]
async fn test_send_otp_mailer_failure_keeps_record() {
    let (otp_repo, _, _, service) = make_service(true);

    let result = service.send_otp("a@b.com").await;
    assert!(!result.success);
    assert_eq!(result.message, MSG_SEND_FAILED);

    // The record was written before the mail attempt; no compensating delete.
    assert_eq!(otp_repo.len().await, 1);
}

#[tokio::test]
async fn test_send_otp_repository_failure() {
    let otp_repo = Arc::new(MockOtpRepository::failing());
    let service = OtpService::new(
        otp_repo,
        Arc::new(MockUserRepository::new()),
        Arc::new(MockMailer::new(false)),
        OtpServiceConfig::default(),
    );

    let result = service.send_otp("a@b.com").await;
    assert!(!result.success);
    assert_eq!(result.message, MSG_SEND_FAILED);
}

#[tokio::test]
async fn test_verify_otp_success_returns_marker_token() {
    let (_, user_repo, mailer, service) = make_service(false);

    service.send_otp("a@b.com").await;
    let code = mailer.get_sent_code("a@b.com").unwrap();

    let result = service.verify_otp("a@b.com", &code).await;
    assert!(result.success);
    assert_eq!(result.message, MSG_VERIFIED);

    let user = user_repo.find_by_email("a@b.com").await.unwrap().unwrap();
    assert_eq!(result.token, Some(format!("otp_verified_{}", user.id)));
    assert_eq!(user.display_name, "a");
    assert_eq!(user.role, UserRole::Passenger);
    assert!(user.is_verified);
}

#[tokio::test]
async fn test_verify_otp_is_single_use() {
    let (_, _, mailer, service) = make_service(false);

    service.send_otp("a@b.com").await;
    let code = mailer.get_sent_code("a@b.com").unwrap();

    assert!(service.verify_otp("a@b.com", &code).await.success);

    let second = service.verify_otp("a@b.com", &code).await;
    assert!(!second.success);
    assert_eq!(second.message, OtpError::NoEligibleCode.to_string());
}

#[tokio::test]
async fn test_verify_otp_attempt_ceiling_burns_record() {
    let (otp_repo, _, mailer, service) = make_service(false);

    let otp_id = service.send_otp("a@b.com").await.otp_id.unwrap();
    let code = mailer.get_sent_code("a@b.com").unwrap();

    // Literal end-to-end scenario: three wrong guesses, then the true code.
    let first = service.verify_otp("a@b.com", "000000").await;
    assert!(!first.success);
    assert_eq!(first.message, OtpError::InvalidCode.to_string());
    assert_eq!(otp_repo.get(otp_id).await.unwrap().attempts, 1);

    let second = service.verify_otp("a@b.com", "111111").await;
    assert_eq!(second.message, OtpError::InvalidCode.to_string());
    assert_eq!(otp_repo.get(otp_id).await.unwrap().attempts, 2);

    let third = service.verify_otp("a@b.com", "222222").await;
    assert!(!third.success);
    assert_eq!(third.message, OtpError::MaxAttemptsExceeded.to_string());

    let record = otp_repo.get(otp_id).await.unwrap();
    assert!(record.is_used);
    assert_eq!(record.attempts, 3);

    // The record is burned; the correct code can no longer redeem it.
    let fourth = service.verify_otp("a@b.com", &code).await;
    assert!(!fourth.success);
    assert_eq!(fourth.message, OtpError::NoEligibleCode.to_string());
}

#[tokio::test]
async fn test_verify_otp_never_selects_expired_record() {
    let (otp_repo, _, _, service) = make_service(false);

    let mut record = OtpRecord::new("a@b.com", "482913".to_string(), 5);
    record.expires_at = Utc::now() - Duration::seconds(1);
    let id = record.id;
    otp_repo.insert(record).await;

    let result = service.verify_otp("a@b.com", "482913").await;
    assert!(!result.success);
    assert_eq!(result.message, OtpError::NoEligibleCode.to_string());

    // Nothing eligible was found, so no counter was touched.
    assert_eq!(otp_repo.get(id).await.unwrap().attempts, 0);
}

#[tokio::test]
async fn test_verify_otp_most_recent_record_wins() {
    let (otp_repo, _, _, service) = make_service(false);

    let mut earlier = OtpRecord::new("a@b.com", "111111".to_string(), 5);
    earlier.expires_at = Utc::now() + Duration::minutes(2);
    otp_repo.insert(earlier).await;

    let mut later = OtpRecord::new("a@b.com", "222222".to_string(), 5);
    later.expires_at = Utc::now() + Duration::minutes(5);
    otp_repo.insert(later).await;

    // The earlier record's code no longer matches anything eligible.
    let stale = service.verify_otp("a@b.com", "111111").await;
    assert!(!stale.success);
    assert_eq!(stale.message, OtpError::InvalidCode.to_string());

    let fresh = service.verify_otp("a@b.com", "222222").await;
    assert!(fresh.success);
}

#[tokio::test]
async fn test_verify_otp_email_is_case_insensitive() {
    let (_, _, mailer, service) = make_service(false);

    service.send_otp("User@Example.com").await;
    let code = mailer.get_sent_code("user@example.com").unwrap();

    let result = service.verify_otp("USER@EXAMPLE.COM", &code).await;
    assert!(result.success);
}

#[tokio::test]
async fn test_verify_otp_reuses_existing_user() {
    let (_, user_repo, mailer, service) = make_service(false);

    let existing = user_repo
        .create(UserAccount::from_email("a@b.com"))
        .await
        .unwrap();

    service.send_otp("a@b.com").await;
    let code = mailer.get_sent_code("a@b.com").unwrap();

    let result = service.verify_otp("a@b.com", &code).await;
    assert!(result.success);
    assert_eq!(result.token, Some(format!("otp_verified_{}", existing.id)));
    assert_eq!(user_repo.len().await, 1);
}

#[tokio::test]
async fn test_verify_otp_repository_failure_yields_generic_message() {
    let service = OtpService::new(
        Arc::new(MockOtpRepository::failing()),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockMailer::new(false)),
        OtpServiceConfig::default(),
    );

    let result = service.verify_otp("a@b.com", "123456").await;
    assert!(!result.success);
    assert_eq!(result.message, MSG_VERIFY_FAILED);
}

#[tokio::test]
async fn test_verify_otp_user_lookup_failure_yields_generic_message() {
    let otp_repo = Arc::new(MockOtpRepository::new());
    let mailer = Arc::new(MockMailer::new(false));
    let service = OtpService::new(
        otp_repo.clone(),
        Arc::new(MockUserRepository::failing()),
        mailer.clone(),
        OtpServiceConfig::default(),
    );

    let otp_id = service.send_otp("a@b.com").await.otp_id.unwrap();
    let code = mailer.get_sent_code("a@b.com").unwrap();

    let result = service.verify_otp("a@b.com", &code).await;
    assert!(!result.success);
    assert_eq!(result.message, MSG_VERIFY_FAILED);

    // The code was consumed before the identity lookup failed.
    assert!(otp_repo.get(otp_id).await.unwrap().is_used);
}

#[tokio::test]
async fn test_cleanup_is_idempotent() {
    let (otp_repo, _, _, service) = make_service(false);

    let mut expired = OtpRecord::new("a@b.com", "111111".to_string(), 5);
    expired.expires_at = Utc::now() - Duration::minutes(1);
    otp_repo.insert(expired).await;

    let mut expired_used = OtpRecord::new("b@c.com", "222222".to_string(), 5);
    expired_used.is_used = true;
    expired_used.expires_at = Utc::now() - Duration::minutes(10);
    otp_repo.insert(expired_used).await;

    otp_repo
        .insert(OtpRecord::new("c@d.com", "333333".to_string(), 5))
        .await;

    assert_eq!(service.cleanup_expired_otps().await, 2);
    assert_eq!(otp_repo.len().await, 1);

    // Second sweep with no new expirations deletes nothing and raises no error.
    assert_eq!(service.cleanup_expired_otps().await, 0);
    assert_eq!(otp_repo.len().await, 1);
}

#[tokio::test]
async fn test_cleanup_swallows_repository_failure() {
    let service = OtpService::new(
        Arc::new(MockOtpRepository::failing()),
        Arc::new(MockUserRepository::new()),
        Arc::new(MockMailer::new(false)),
        OtpServiceConfig::default(),
    );

    assert_eq!(service.cleanup_expired_otps().await, 0);
}
