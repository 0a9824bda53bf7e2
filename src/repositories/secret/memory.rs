//! In-memory implementation of SecretStore.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::SecretRecord;
use crate::errors::MfaError;

use super::r#trait::SecretStore;

/// Secret store backed by a map keyed by owner id.
///
/// Replaces the ad-hoc global concurrent maps of earlier designs with an
/// explicit store instance; also serves as the test fixture.
#[derive(Default)]
pub struct InMemorySecretStore {
    records: Arc<RwLock<HashMap<Uuid, SecretRecord>>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get(&self, owner_id: Uuid) -> Result<Option<SecretRecord>, MfaError> {
        let records = self.records.read().await;
        Ok(records.get(&owner_id).cloned())
    }

    async fn put(&self, record: SecretRecord) -> Result<(), MfaError> {
        let mut records = self.records.write().await;
        records.insert(record.owner_id, record);
        Ok(())
    }

    async fn delete(&self, owner_id: Uuid) -> Result<bool, MfaError> {
        let mut records = self.records.write().await;
        Ok(records.remove(&owner_id).is_some())
    }
}
