//! Per-owner mutual exclusion for read-then-write sequences.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Registry of per-owner async mutexes.
///
/// Every enrollment and verification sequence that reads and then writes a
/// single owner's record must run under that owner's lock; without it, two
/// concurrent failing attempts can both observe the same failure count and
/// neither trips the lockout, and two concurrent submissions of the same
/// valid code can both succeed. Flows for distinct owners never contend.
///
/// Hold times are microseconds of CPU plus in-memory store access, so lock
/// entries are simply retained for the process lifetime.
#[derive(Default)]
pub struct OwnerLockMap {
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl OwnerLockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for an owner, creating it on first use.
    pub async fn lock(&self, owner_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(owner_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
