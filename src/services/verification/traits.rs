//! Trait for verification token issuance

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::MfaError;

/// Capability for minting the short-lived token returned on successful
/// verification.
///
/// Token signing lives outside this core; hosts inject a session or JWT
/// issuer. The token is opaque here.
#[async_trait]
pub trait VerificationTokenIssuer: Send + Sync {
    /// Issue a verification token for an owner that just passed MFA.
    async fn issue(&self, owner_id: Uuid) -> Result<String, MfaError>;
}
