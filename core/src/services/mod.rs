//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{Mailer, OtpService, OtpServiceConfig, SendOtpResult, VerifyOtpResult};
