//! MySQL repository implementations

pub mod otp_repository_impl;
pub mod user_repository_impl;

pub use otp_repository_impl::MySqlOtpRepository;
pub use user_repository_impl::MySqlUserRepository;
