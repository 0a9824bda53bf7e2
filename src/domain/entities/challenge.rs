//! Enrollment challenge entity.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default time-to-live for enrollment challenges (10 minutes)
pub const DEFAULT_CHALLENGE_TTL_MINUTES: i64 = 10;

/// Ephemeral token representing an in-progress enrollment awaiting
/// confirmation.
///
/// A challenge is consumed exactly once by a correct-code confirmation.
/// A wrong-code attempt leaves it untouched; it remains retryable until its
/// TTL elapses. Expiry is checked lazily on access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique identifier for the challenge
    pub id: Uuid,

    /// Owner the pending enrollment belongs to
    pub owner_id: Uuid,

    /// The pending shared secret, base32-encoded
    pub secret: String,

    /// Timestamp when the challenge was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the challenge expires
    pub expires_at: DateTime<Utc>,

    /// Whether the challenge has been consumed
    pub used: bool,
}

impl Challenge {
    /// Creates a new challenge with the default TTL.
    pub fn new(owner_id: Uuid, secret: String) -> Self {
        Self::new_with_ttl(owner_id, secret, DEFAULT_CHALLENGE_TTL_MINUTES)
    }

    /// Creates a new challenge with a custom TTL in minutes.
    pub fn new_with_ttl(owner_id: Uuid, secret: String, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            secret,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
            used: false,
        }
    }

    /// Checks if the challenge has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the challenge can still be consumed by `owner_id`.
    pub fn is_consumable_by(&self, owner_id: Uuid) -> bool {
        self.owner_id == owner_id && !self.used && !self.is_expired()
    }

    /// Marks the challenge as consumed.
    pub fn mark_used(&mut self) {
        self.used = true;
    }

    /// Time remaining until expiration, or zero if already expired.
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_new_challenge() {
        let owner_id = Uuid::new_v4();
        let challenge = Challenge::new(owner_id, "JBSWY3DPEHPK3PXP".to_string());

        assert_eq!(challenge.owner_id, owner_id);
        assert!(!challenge.used);
        assert!(!challenge.is_expired());
        assert!(challenge.is_consumable_by(owner_id));
        assert_eq!(
            challenge.expires_at,
            challenge.created_at + Duration::minutes(DEFAULT_CHALLENGE_TTL_MINUTES)
        );
    }

    #[test]
    fn test_owner_mismatch_is_not_consumable() {
        let challenge = Challenge::new(Uuid::new_v4(), "JBSWY3DPEHPK3PXP".to_string());
        assert!(!challenge.is_consumable_by(Uuid::new_v4()));
    }

    #[test]
    fn test_used_challenge_is_not_consumable() {
        let owner_id = Uuid::new_v4();
        let mut challenge = Challenge::new(owner_id, "JBSWY3DPEHPK3PXP".to_string());

        challenge.mark_used();
        assert!(challenge.used);
        assert!(!challenge.is_consumable_by(owner_id));
    }

    #[test]
    fn test_expired_challenge_is_not_consumable() {
        let owner_id = Uuid::new_v4();
        let challenge = Challenge::new_with_ttl(owner_id, "JBSWY3DPEHPK3PXP".to_string(), 0);

        thread::sleep(StdDuration::from_millis(10));

        assert!(challenge.is_expired());
        assert!(!challenge.is_consumable_by(owner_id));
        assert_eq!(challenge.time_until_expiration(), Duration::zero());
    }
}
