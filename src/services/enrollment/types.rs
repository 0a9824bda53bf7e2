//! Types for enrollment service results

use crate::domain::entities::Challenge;

/// Result of initiating MFA setup
#[derive(Debug, Clone)]
pub struct InitSetupResult {
    /// The pending challenge awaiting code confirmation
    pub challenge: Challenge,
    /// Provisioning URI for the authenticator app QR code
    pub provisioning_uri: String,
}

/// Result of completing MFA setup
#[derive(Debug, Clone)]
pub struct CompleteSetupResult {
    /// Freshly generated one-time backup codes. Shown to the user exactly
    /// once; persistence and redemption are the caller's concern.
    pub backup_codes: Vec<String>,
}

/// Outcome of removing an MFA setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveSetupOutcome {
    /// An enrollment existed and was deleted
    Removed,
    /// Nothing was enrolled for this owner
    NotEnrolled,
}
