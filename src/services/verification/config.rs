//! Configuration for the verification service

use chrono::Duration;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// Consecutive failures before the account locks
    pub max_failure_attempts: u32,
    /// Seconds an account stays locked after the final failed attempt
    pub lockout_duration_seconds: i64,
}

impl VerificationConfig {
    pub fn lockout_duration(&self) -> Duration {
        Duration::seconds(self.lockout_duration_seconds)
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_failure_attempts: 5,
            lockout_duration_seconds: 15 * 60,
        }
    }
}
