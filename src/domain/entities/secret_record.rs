//! Secret record entity: the per-owner TOTP enrollment state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-owner TOTP enrollment state.
///
/// Created unverified by enrollment, activated on correct-code confirmation,
/// and mutated by every verification attempt. The shared secret is held in
/// base32 text form and is immutable once assigned; rotation is an explicit
/// delete+recreate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Owner this enrollment belongs to
    pub owner_id: Uuid,

    /// Shared secret, base32-encoded (RFC 4648, no padding)
    pub secret: String,

    /// Account label shown by authenticator apps (e.g. an email address)
    pub account_label: String,

    /// Issuer label shown by authenticator apps
    pub issuer_label: String,

    /// Whether enrollment has been confirmed with a correct code
    pub verified: bool,

    /// Time-step counter of the last successfully consumed code.
    /// Monotonically non-decreasing; used for anti-replay.
    pub last_used_counter: Option<i64>,

    /// Consecutive failed verification attempts.
    /// Resets to 0 only on a successful verification.
    pub failure_count: u32,

    /// Timestamp of the most recent failed attempt
    pub last_failure_at: Option<DateTime<Utc>>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl SecretRecord {
    /// Creates a new, unverified enrollment record.
    pub fn new(owner_id: Uuid, secret: String, account_label: String, issuer_label: String) -> Self {
        Self {
            owner_id,
            secret,
            account_label,
            issuer_label,
            verified: false,
            last_used_counter: None,
            failure_count: 0,
            last_failure_at: None,
            created_at: Utc::now(),
        }
    }

    /// Marks the enrollment as confirmed and clears the failure counter.
    pub fn mark_verified(&mut self) {
        self.verified = true;
        self.failure_count = 0;
        self.last_failure_at = None;
    }

    /// Records a failed verification attempt at `now`.
    ///
    /// Returns the failure count after the increment.
    pub fn record_failure(&mut self, now: DateTime<Utc>) -> u32 {
        self.failure_count += 1;
        self.last_failure_at = Some(now);
        self.failure_count
    }

    /// Records a successful verification of the code for `counter`.
    ///
    /// The consumed counter never moves backwards, so a stale clock cannot
    /// reopen an already-used time window.
    pub fn record_success(&mut self, counter: i64) {
        let consumed = match self.last_used_counter {
            Some(previous) => previous.max(counter),
            None => counter,
        };
        self.last_used_counter = Some(consumed);
        self.failure_count = 0;
        self.last_failure_at = None;
    }

    /// Whether the code for `counter` has already been consumed.
    pub fn counter_already_used(&self, counter: i64) -> bool {
        matches!(self.last_used_counter, Some(used) if used >= counter)
    }

    /// Remaining lockout seconds at `now`, if the record is currently locked.
    ///
    /// A record is locked while the failure count has reached `max_attempts`
    /// and the lockout window since the last failure has not elapsed. The
    /// failure count itself is not reset here; only a successful verification
    /// clears it.
    pub fn lockout_remaining(
        &self,
        now: DateTime<Utc>,
        max_attempts: u32,
        lockout_duration: Duration,
    ) -> Option<i64> {
        if self.failure_count < max_attempts {
            return None;
        }
        let last_failure = self.last_failure_at?;
        let unlock_at = last_failure + lockout_duration;
        if now < unlock_at {
            Some((unlock_at - now).num_seconds().max(1))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SecretRecord {
        SecretRecord::new(
            Uuid::new_v4(),
            "JBSWY3DPEHPK3PXP".to_string(),
            "user@example.com".to_string(),
            "ExampleApp".to_string(),
        )
    }

    #[test]
    fn test_new_record_is_unverified() {
        let record = record();
        assert!(!record.verified);
        assert_eq!(record.failure_count, 0);
        assert!(record.last_used_counter.is_none());
        assert!(record.last_failure_at.is_none());
    }

    #[test]
    fn test_mark_verified_clears_failures() {
        let mut record = record();
        record.record_failure(Utc::now());
        record.mark_verified();

        assert!(record.verified);
        assert_eq!(record.failure_count, 0);
        assert!(record.last_failure_at.is_none());
    }

    #[test]
    fn test_record_failure_increments_and_stamps() {
        let mut record = record();
        let now = Utc::now();

        assert_eq!(record.record_failure(now), 1);
        assert_eq!(record.record_failure(now), 2);
        assert_eq!(record.last_failure_at, Some(now));
    }

    #[test]
    fn test_record_success_resets_failures() {
        let mut record = record();
        record.record_failure(Utc::now());
        record.record_failure(Utc::now());

        record.record_success(1000);

        assert_eq!(record.failure_count, 0);
        assert!(record.last_failure_at.is_none());
        assert_eq!(record.last_used_counter, Some(1000));
    }

    #[test]
    fn test_last_used_counter_never_decreases() {
        let mut record = record();
        record.record_success(1000);
        record.record_success(998);

        assert_eq!(record.last_used_counter, Some(1000));
        assert!(record.counter_already_used(998));
        assert!(record.counter_already_used(1000));
        assert!(!record.counter_already_used(1001));
    }

    #[test]
    fn test_lockout_remaining_requires_max_attempts() {
        let mut record = record();
        let now = Utc::now();
        record.record_failure(now);

        assert_eq!(record.lockout_remaining(now, 5, Duration::minutes(15)), None);
    }

    #[test]
    fn test_lockout_remaining_within_window() {
        let mut record = record();
        let now = Utc::now();
        for _ in 0..5 {
            record.record_failure(now);
        }

        let remaining = record
            .lockout_remaining(now + Duration::seconds(60), 5, Duration::minutes(15))
            .expect("record should be locked");
        assert_eq!(remaining, 14 * 60);
    }

    #[test]
    fn test_lockout_expires_but_failure_count_stays() {
        let mut record = record();
        let now = Utc::now();
        for _ in 0..5 {
            record.record_failure(now);
        }

        let later = now + Duration::minutes(16);
        assert_eq!(record.lockout_remaining(later, 5, Duration::minutes(15)), None);
        // The counter survives the elapsed window; only success resets it.
        assert_eq!(record.failure_count, 5);
    }

    #[test]
    fn test_serialization_round_trip() {
        let record = record();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: SecretRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
