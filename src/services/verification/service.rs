//! Main verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{MfaError, MfaResult};
use crate::repositories::SecretStore;
use crate::services::otp::{TotpConfig, TotpGenerator};
use crate::services::owner_lock::OwnerLockMap;

use super::config::VerificationConfig;
use super::traits::VerificationTokenIssuer;
use super::types::VerifySuccess;

/// Verification service consuming TOTP codes against active enrollments.
///
/// Per-owner state machine: `ACTIVE <-> LOCKED`. The whole check-then-mutate
/// sequence of [`verify`](Self::verify) runs under the owner's lock and
/// commits the mutated record at most once, so it is logically atomic:
/// either the full step sequence applies or none of it does.
pub struct VerificationService<S: SecretStore, T: VerificationTokenIssuer> {
    /// Store for per-owner enrollment records
    secrets: Arc<S>,
    /// Issuer for post-MFA verification tokens
    token_issuer: Arc<T>,
    /// Per-owner mutual exclusion, shared with the enrollment service
    locks: Arc<OwnerLockMap>,
    /// Pure TOTP code generator
    generator: TotpGenerator,
    /// Service configuration
    config: VerificationConfig,
}

impl<S: SecretStore, T: VerificationTokenIssuer> VerificationService<S, T> {
    /// Create a new verification service
    pub fn new(
        secrets: Arc<S>,
        token_issuer: Arc<T>,
        locks: Arc<OwnerLockMap>,
        totp_config: TotpConfig,
        config: VerificationConfig,
    ) -> Self {
        Self {
            secrets,
            token_issuer,
            locks,
            generator: TotpGenerator::new(totp_config),
            config,
        }
    }

    /// Create a new verification service with default configuration
    pub fn with_defaults(secrets: Arc<S>, token_issuer: Arc<T>, locks: Arc<OwnerLockMap>) -> Self {
        Self::new(
            secrets,
            token_issuer,
            locks,
            TotpConfig::default(),
            VerificationConfig::default(),
        )
    }

    /// Verify a submitted code for an owner at time `now`.
    ///
    /// Step sequence:
    /// 1. missing or unverified enrollment fails `NOT_ENROLLED`
    /// 2. an active lockout fails `ACCOUNT_LOCKED` with the remaining seconds
    /// 3. a blank code fails `EMPTY_CODE` without touching the failure count
    /// 4. a time window whose code was already consumed fails
    ///    `CODE_ALREADY_USED` regardless of the resubmission's correctness
    /// 5. a mismatch increments the failure count; reaching the cap fails
    ///    `TOO_MANY_ATTEMPTS`, otherwise `INVALID_CODE` with the remaining
    ///    budget. A match consumes the current window, resets the failure
    ///    state, and returns a token from the injected issuer.
    pub async fn verify(
        &self,
        owner_id: Uuid,
        submitted_code: &str,
        now: DateTime<Utc>,
    ) -> MfaResult<VerifySuccess> {
        let _guard = self.locks.lock(owner_id).await;

        let mut record = match self.secrets.get(owner_id).await? {
            Some(record) if record.verified => record,
            _ => return Err(MfaError::NotEnrolled),
        };

        if let Some(remaining_seconds) = record.lockout_remaining(
            now,
            self.config.max_failure_attempts,
            self.config.lockout_duration(),
        ) {
            tracing::warn!(
                owner_id = %owner_id,
                remaining_seconds = remaining_seconds,
                event = "mfa_verify_locked",
                "Verification attempt against a locked account"
            );
            return Err(MfaError::AccountLocked { remaining_seconds });
        }

        if submitted_code.trim().is_empty() {
            return Err(MfaError::EmptyCode);
        }

        let counter_now = self.generator.counter_at(now);
        if record.counter_already_used(counter_now) {
            tracing::warn!(
                owner_id = %owner_id,
                event = "mfa_code_replayed",
                "Code for an already-consumed time window was submitted"
            );
            return Err(MfaError::CodeAlreadyUsed);
        }

        let window = self.generator.config().window_tolerance;
        if !self
            .generator
            .verify(&record.secret, submitted_code, now, window)?
        {
            let failures = record.record_failure(now);
            self.secrets.put(record).await?;

            if failures >= self.config.max_failure_attempts {
                tracing::warn!(
                    owner_id = %owner_id,
                    failures = failures,
                    lockout_seconds = self.config.lockout_duration_seconds,
                    event = "mfa_account_locked",
                    "Failure budget exhausted; account is now locked"
                );
                return Err(MfaError::TooManyAttempts);
            }

            let remaining = self.config.max_failure_attempts - failures;
            tracing::warn!(
                owner_id = %owner_id,
                remaining_attempts = remaining,
                event = "mfa_verify_failed",
                "Wrong verification code"
            );
            return Err(MfaError::InvalidCode {
                remaining_attempts: Some(remaining),
            });
        }

        record.record_success(counter_now);
        self.secrets.put(record).await?;

        let token = self.token_issuer.issue(owner_id).await?;

        tracing::info!(
            owner_id = %owner_id,
            event = "mfa_verify_succeeded",
            "Verification code accepted"
        );

        Ok(VerifySuccess { owner_id, token })
    }
}
