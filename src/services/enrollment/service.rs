//! Main enrollment service implementation

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Challenge, SecretRecord};
use crate::errors::{MfaError, MfaResult};
use crate::repositories::{ChallengeStore, SecretStore};
use crate::services::otp::{TotpConfig, TotpGenerator};
use crate::services::owner_lock::OwnerLockMap;

use super::backup::generate_backup_codes;
use super::config::EnrollmentConfig;
use super::types::{CompleteSetupResult, InitSetupResult, RemoveSetupOutcome};

/// Enrollment service orchestrating secret creation and activation.
///
/// Per-owner state machine: `NOT_SETUP -> PENDING_VERIFICATION -> ACTIVE`.
/// Every operation holds the owner's lock for its whole read-then-write
/// sequence, so concurrent calls for the same owner are linearized.
pub struct EnrollmentService<S: SecretStore, C: ChallengeStore> {
    /// Store for per-owner enrollment records
    secrets: Arc<S>,
    /// Store for pending challenges
    challenges: Arc<C>,
    /// Per-owner mutual exclusion, shared with the verification service
    locks: Arc<OwnerLockMap>,
    /// Pure TOTP code generator
    generator: TotpGenerator,
    /// Service configuration
    config: EnrollmentConfig,
}

impl<S: SecretStore, C: ChallengeStore> EnrollmentService<S, C> {
    /// Create a new enrollment service
    pub fn new(
        secrets: Arc<S>,
        challenges: Arc<C>,
        locks: Arc<OwnerLockMap>,
        totp_config: TotpConfig,
        config: EnrollmentConfig,
    ) -> Self {
        Self {
            secrets,
            challenges,
            locks,
            generator: TotpGenerator::new(totp_config),
            config,
        }
    }

    /// Create a new enrollment service with default configuration
    pub fn with_defaults(secrets: Arc<S>, challenges: Arc<C>, locks: Arc<OwnerLockMap>) -> Self {
        Self::new(
            secrets,
            challenges,
            locks,
            TotpConfig::default(),
            EnrollmentConfig::default(),
        )
    }

    /// Begin MFA setup for an owner.
    ///
    /// Generates a fresh shared secret, stores an unverified record, and
    /// issues a short-lived challenge carrying the provisioning URI.
    /// Calling again before completion discards the previous pending secret
    /// and its challenges. An owner with an already-active enrollment must
    /// remove it first; rotation is an explicit delete+recreate.
    ///
    /// # Returns
    /// * `Ok(InitSetupResult)` - Challenge plus provisioning URI
    /// * `Err(MfaError::AlreadyEnrolled)` - A verified enrollment exists
    /// * `Err(MfaError)` - Secret generation or storage failure
    pub async fn init_setup(
        &self,
        owner_id: Uuid,
        account_label: &str,
    ) -> MfaResult<InitSetupResult> {
        let _guard = self.locks.lock(owner_id).await;

        if let Some(existing) = self.secrets.get(owner_id).await? {
            if existing.verified {
                tracing::warn!(
                    owner_id = %owner_id,
                    event = "mfa_setup_rejected",
                    "Setup requested while an active enrollment exists"
                );
                return Err(MfaError::AlreadyEnrolled);
            }
        }

        let secret = self.generator.generate_secret()?;
        let record = SecretRecord::new(
            owner_id,
            secret.clone(),
            account_label.to_string(),
            self.config.issuer_label.clone(),
        );
        self.secrets.put(record).await?;

        // Only the newest pending challenge may complete this setup.
        self.challenges.delete_for_owner(owner_id).await?;

        let challenge =
            Challenge::new_with_ttl(owner_id, secret.clone(), self.config.challenge_ttl_minutes);
        self.challenges.put(challenge.clone()).await?;

        let provisioning_uri =
            self.generator
                .provisioning_uri(&secret, account_label, &self.config.issuer_label);

        tracing::info!(
            owner_id = %owner_id,
            challenge_id = %challenge.id,
            event = "mfa_setup_initiated",
            "Generated new MFA secret and enrollment challenge"
        );

        Ok(InitSetupResult {
            challenge,
            provisioning_uri,
        })
    }

    /// Confirm MFA setup with a code from the authenticator app.
    ///
    /// A wrong code increments the pending record's failure count but leaves
    /// the challenge unused and unexpired, so the owner may retry until the
    /// TTL elapses. A correct code activates the enrollment, consumes the
    /// challenge exactly once, and returns one-time backup codes.
    ///
    /// # Returns
    /// * `Ok(CompleteSetupResult)` - Enrollment is now active
    /// * `Err(MfaError::InvalidChallenge)` - Challenge missing, expired,
    ///   already used, or owned by someone else
    /// * `Err(MfaError::InvalidCode)` - Code mismatch; challenge retryable
    pub async fn complete_setup(
        &self,
        owner_id: Uuid,
        challenge_id: Uuid,
        submitted_code: &str,
    ) -> MfaResult<CompleteSetupResult> {
        let _guard = self.locks.lock(owner_id).await;
        let now = Utc::now();

        let challenge = match self.challenges.get(challenge_id).await? {
            Some(challenge) if challenge.is_consumable_by(owner_id) => challenge,
            _ => {
                tracing::warn!(
                    owner_id = %owner_id,
                    challenge_id = %challenge_id,
                    event = "mfa_challenge_rejected",
                    "Enrollment challenge missing, expired, used, or owner mismatch"
                );
                return Err(MfaError::InvalidChallenge);
            }
        };

        let mut record = match self.secrets.get(owner_id).await? {
            // A verified record means this challenge predates a completed
            // setup and must not reactivate an old secret.
            Some(record) if !record.verified && record.secret == challenge.secret => record,
            _ => return Err(MfaError::InvalidChallenge),
        };

        let window = self.generator.config().window_tolerance;
        if !self
            .generator
            .verify(&record.secret, submitted_code, now, window)?
        {
            record.record_failure(now);
            self.secrets.put(record).await?;

            tracing::warn!(
                owner_id = %owner_id,
                challenge_id = %challenge_id,
                event = "mfa_setup_code_rejected",
                "Wrong code during enrollment confirmation; challenge stays retryable"
            );
            return Err(MfaError::InvalidCode {
                remaining_attempts: None,
            });
        }

        record.mark_verified();
        self.secrets.put(record).await?;
        self.challenges.mark_used(challenge_id).await?;

        let backup_codes = generate_backup_codes(self.config.backup_code_count)?;

        tracing::info!(
            owner_id = %owner_id,
            challenge_id = %challenge_id,
            event = "mfa_setup_completed",
            "MFA enrollment activated"
        );

        Ok(CompleteSetupResult { backup_codes })
    }

    /// Remove an owner's MFA setup, verified or pending.
    ///
    /// Idempotent: removing a non-enrolled owner reports
    /// [`RemoveSetupOutcome::NotEnrolled`] rather than failing.
    pub async fn remove_setup(&self, owner_id: Uuid) -> MfaResult<RemoveSetupOutcome> {
        let _guard = self.locks.lock(owner_id).await;

        let removed = self.secrets.delete(owner_id).await?;
        self.challenges.delete_for_owner(owner_id).await?;

        if removed {
            tracing::info!(
                owner_id = %owner_id,
                event = "mfa_setup_removed",
                "MFA enrollment deleted"
            );
            Ok(RemoveSetupOutcome::Removed)
        } else {
            Ok(RemoveSetupOutcome::NotEnrolled)
        }
    }
}
