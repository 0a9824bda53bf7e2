//! Domain-specific error types for the MFA engine.
//!
//! Every failure mode of enrollment and verification is a typed variant
//! carrying the structured data a caller needs to render actionable guidance
//! (remaining attempts, remaining lockout time) without leaking the secret or
//! internal counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors produced by the MFA core.
///
/// None of these are retried internally; retry policy for transient storage
/// failures is the caller's responsibility.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MfaError {
    /// No verified secret exists for the owner.
    #[error("Owner is not enrolled in MFA")]
    NotEnrolled,

    /// A blank code was submitted. Does not count as a failed attempt.
    #[error("Verification code must not be empty")]
    EmptyCode,

    /// The current time window's code was already consumed.
    #[error("Verification code for this time window has already been used")]
    CodeAlreadyUsed,

    /// Code mismatch. Login verification reports the remaining attempt
    /// budget; enrollment confirmation has no budget and reports `None`.
    #[error("Invalid verification code")]
    InvalidCode { remaining_attempts: Option<u32> },

    /// The failing attempt that exhausted the attempt budget.
    #[error("Too many failed verification attempts")]
    TooManyAttempts,

    /// Verification refused while the lockout window is active.
    #[error("Account locked. Try again in {remaining_seconds} second(s)")]
    AccountLocked { remaining_seconds: i64 },

    /// Enrollment challenge missing, expired, consumed, or owned by someone else.
    #[error("Invalid or expired enrollment challenge")]
    InvalidChallenge,

    /// A verified secret already exists; rotation is explicit delete+recreate.
    #[error("Owner already has an active MFA enrollment")]
    AlreadyEnrolled,

    /// The secure random provider failed. Fatal, never retried.
    #[error("Secret generation failed: {message}")]
    SecretGeneration { message: String },

    /// A stored secret is not valid base32. Fatal configuration error.
    #[error("Malformed secret encoding: {message}")]
    MalformedSecret { message: String },

    /// Storage I/O failure. Safe for the caller to retry the whole flow.
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl MfaError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            MfaError::NotEnrolled => "NOT_ENROLLED",
            MfaError::EmptyCode => "EMPTY_CODE",
            MfaError::CodeAlreadyUsed => "CODE_ALREADY_USED",
            MfaError::InvalidCode { .. } => "INVALID_CODE",
            MfaError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            MfaError::AccountLocked { .. } => "ACCOUNT_LOCKED",
            MfaError::InvalidChallenge => "INVALID_CHALLENGE",
            MfaError::AlreadyEnrolled => "ALREADY_ENROLLED",
            MfaError::SecretGeneration { .. } => "SECRET_GENERATION_FAILURE",
            MfaError::MalformedSecret { .. } => "MALFORMED_SECRET",
            MfaError::Storage { .. } => "INFRA_ERROR",
        }
    }
}

pub type MfaResult<T> = Result<T, MfaError>;

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a single detail to the error response
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}

impl From<MfaError> for ErrorResponse {
    fn from(err: MfaError) -> Self {
        let response = ErrorResponse::new(err.code(), err.to_string());
        match err {
            MfaError::InvalidCode {
                remaining_attempts: Some(remaining),
            } => response.with_detail("remaining_attempts", serde_json::json!(remaining)),
            MfaError::AccountLocked { remaining_seconds } => {
                response.with_detail("remaining_lockout_seconds", serde_json::json!(remaining_seconds))
            }
            _ => response,
        }
    }
}
