//! Domain-specific error types and error handling.

use thiserror::Error;

/// OTP-specific errors
///
/// These represent the expected, non-exceptional rejections of the
/// verification flow. They are folded into user-facing result messages at
/// the service boundary and never surface to callers as raw errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid OTP")]
    InvalidCode,

    #[error("Invalid or expired OTP")]
    NoEligibleCode,

    #[error("Too many failed attempts. Please request a new OTP.")]
    MaxAttemptsExceeded,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to OTP-specific errors
    #[error(transparent)]
    Otp(#[from] OtpError),
}

pub type DomainResult<T> = Result<T, DomainError>;
