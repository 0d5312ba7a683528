//! Periodic cleanup of expired OTP records
//!
//! The core service exposes the sweep as a callable operation but never
//! schedules it; this task is the external scheduler that invokes it on an
//! interval. Expiry filtering in verification already guarantees
//! correctness, so the sweep is storage hygiene only.

use std::sync::Arc;
use tracing::{info, warn};

use mailotp_core::repositories::{OtpRepository, UserRepository};
use mailotp_core::services::otp::{Mailer, OtpService};

/// Configuration for the OTP cleanup task
#[derive(Debug, Clone)]
pub struct OtpCleanupConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background task is enabled
    pub enabled: bool,
}

impl Default for OtpCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: false,
        }
    }
}

/// Background task sweeping expired OTP records
pub struct OtpCleanupService<O, U, M>
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    service: Arc<OtpService<O, U, M>>,
    config: OtpCleanupConfig,
}

impl<O, U, M> OtpCleanupService<O, U, M>
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    /// Create a new cleanup task
    pub fn new(service: Arc<OtpService<O, U, M>>, config: OtpCleanupConfig) -> Self {
        Self { service, config }
    }

    /// Run a single sweep
    pub async fn run_once(&self) -> u64 {
        let deleted = self.service.cleanup_expired_otps().await;
        info!(deleted = deleted, "OTP cleanup cycle completed");
        deleted
    }

    /// Start the cleanup task in the background
    ///
    /// Spawns a tokio task that sweeps at the configured interval. Sweep
    /// failures are logged inside the core service and never stop the loop.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("OTP cleanup task is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "OTP cleanup task started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                self.run_once().await;
            }
        });
    }
}
