//! Domain entities representing core business objects.

pub mod otp_record;
pub mod user;

// Re-export commonly used types
pub use otp_record::{OtpRecord, OtpState, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
pub use user::{UserAccount, UserRole};
