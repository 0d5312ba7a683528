//! Repository trait abstractions for the remote collaborators.

pub mod otp;
pub mod user;

pub use otp::{MockOtpRepository, OtpRepository};
pub use user::{MockUserRepository, UserRepository};
