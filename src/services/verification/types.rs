//! Types for verification service results

use uuid::Uuid;

/// Successful verification outcome
#[derive(Debug, Clone)]
pub struct VerifySuccess {
    /// Owner that passed verification
    pub owner_id: Uuid,
    /// Opaque short-lived verification token from the injected issuer
    pub token: String,
}
