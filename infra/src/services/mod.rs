//! Infrastructure service implementations

pub mod cleanup;

pub use cleanup::{OtpCleanupConfig, OtpCleanupService};
