//! Challenge store trait defining the interface for pending-enrollment state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Challenge;
use crate::errors::MfaError;

/// Persistence contract for [`Challenge`]s, keyed by challenge id.
///
/// Challenges expire by `expires_at`; expiry is checked lazily by the
/// enrollment service, so implementations may keep expired entries around or
/// sweep them for hygiene, whichever suits the backing store.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Load a challenge by id.
    async fn get(&self, id: Uuid) -> Result<Option<Challenge>, MfaError>;

    /// Create or replace a challenge.
    async fn put(&self, challenge: Challenge) -> Result<(), MfaError>;

    /// Mark a challenge as consumed.
    ///
    /// # Returns
    /// * `Ok(true)` - Challenge existed and is now marked used
    /// * `Ok(false)` - No such challenge
    async fn mark_used(&self, id: Uuid) -> Result<bool, MfaError>;

    /// Delete every challenge belonging to an owner.
    ///
    /// Returns the number of challenges removed.
    async fn delete_for_owner(&self, owner_id: Uuid) -> Result<u64, MfaError>;
}
