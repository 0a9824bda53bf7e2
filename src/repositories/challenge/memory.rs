//! In-memory implementation of ChallengeStore.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Challenge;
use crate::errors::MfaError;

use super::r#trait::ChallengeStore;

/// Challenge store backed by a map keyed by challenge id.
#[derive(Default)]
pub struct InMemoryChallengeStore {
    challenges: Arc<RwLock<HashMap<Uuid, Challenge>>>,
}

impl InMemoryChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChallengeStore for InMemoryChallengeStore {
    async fn get(&self, id: Uuid) -> Result<Option<Challenge>, MfaError> {
        let challenges = self.challenges.read().await;
        Ok(challenges.get(&id).cloned())
    }

    async fn put(&self, challenge: Challenge) -> Result<(), MfaError> {
        let mut challenges = self.challenges.write().await;
        challenges.insert(challenge.id, challenge);
        Ok(())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, MfaError> {
        let mut challenges = self.challenges.write().await;
        match challenges.get_mut(&id) {
            Some(challenge) => {
                challenge.mark_used();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_for_owner(&self, owner_id: Uuid) -> Result<u64, MfaError> {
        let mut challenges = self.challenges.write().await;
        let before = challenges.len();
        challenges.retain(|_, c| c.owner_id != owner_id);
        Ok((before - challenges.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mark_used_round_trip() {
        let store = InMemoryChallengeStore::new();
        let challenge = Challenge::new(Uuid::new_v4(), "JBSWY3DPEHPK3PXP".to_string());
        let id = challenge.id;

        store.put(challenge).await.unwrap();
        assert!(!store.get(id).await.unwrap().unwrap().used);

        assert!(store.mark_used(id).await.unwrap());
        assert!(store.get(id).await.unwrap().unwrap().used);

        assert!(!store.mark_used(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_for_owner_removes_all_of_theirs() {
        let store = InMemoryChallengeStore::new();
        let owner_id = Uuid::new_v4();
        let other_owner = Uuid::new_v4();

        store
            .put(Challenge::new(owner_id, "JBSWY3DPEHPK3PXP".to_string()))
            .await
            .unwrap();
        store
            .put(Challenge::new(owner_id, "JBSWY3DPEHPK3PXP".to_string()))
            .await
            .unwrap();
        let kept = Challenge::new(other_owner, "JBSWY3DPEHPK3PXP".to_string());
        let kept_id = kept.id;
        store.put(kept).await.unwrap();

        assert_eq!(store.delete_for_owner(owner_id).await.unwrap(), 2);
        assert_eq!(store.delete_for_owner(owner_id).await.unwrap(), 0);
        assert!(store.get(kept_id).await.unwrap().is_some());
    }
}
