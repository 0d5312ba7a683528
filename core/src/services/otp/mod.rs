//! OTP service module for email-based passwordless authentication
//!
//! This module provides the complete one-time password workflow:
//! - Code generation and delivery by email
//! - Verification with attempt tracking and single-use enforcement
//! - User account upsert on first successful verification
//! - Expired-record cleanup as a callable maintenance operation

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::Mailer;
pub use types::{SendOtpResult, VerifyOtpResult};
