//! Secret store trait defining the interface for enrollment persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::SecretRecord;
use crate::errors::MfaError;

/// Persistence contract for [`SecretRecord`]s, keyed by owner.
///
/// Implementations only need to be a consistent keyed map; the enrollment and
/// verification services linearize all read-then-write sequences per owner
/// themselves, so no store-level compare-and-swap is required. Infrastructure
/// failures are reported as [`MfaError::Storage`] and may be retried by the
/// caller at the flow level.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Load the enrollment record for an owner.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Enrollment exists (verified or pending)
    /// * `Ok(None)` - Owner has no enrollment
    /// * `Err(MfaError)` - Storage failure
    async fn get(&self, owner_id: Uuid) -> Result<Option<SecretRecord>, MfaError>;

    /// Create or replace the enrollment record for `record.owner_id`.
    async fn put(&self, record: SecretRecord) -> Result<(), MfaError>;

    /// Delete the enrollment record for an owner.
    ///
    /// # Returns
    /// * `Ok(true)` - A record existed and was deleted
    /// * `Ok(false)` - Nothing to delete
    /// * `Err(MfaError)` - Storage failure
    async fn delete(&self, owner_id: Uuid) -> Result<bool, MfaError>;
}
