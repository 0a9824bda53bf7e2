//! Configuration for the enrollment service

use crate::domain::entities::DEFAULT_CHALLENGE_TTL_MINUTES;

/// Configuration for the enrollment service
#[derive(Debug, Clone)]
pub struct EnrollmentConfig {
    /// Minutes before a pending enrollment challenge expires
    pub challenge_ttl_minutes: i64,
    /// Issuer label embedded in provisioning URIs
    pub issuer_label: String,
    /// Number of one-time backup codes handed out on activation
    pub backup_code_count: usize,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            challenge_ttl_minutes: DEFAULT_CHALLENGE_TTL_MINUTES,
            issuer_label: "MFA".to_string(),
            backup_code_count: 10,
        }
    }
}
