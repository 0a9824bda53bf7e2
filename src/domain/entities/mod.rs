//! Domain entities representing per-owner MFA state.

pub mod challenge;
pub mod secret_record;

// Re-export commonly used types
pub use challenge::{Challenge, DEFAULT_CHALLENGE_TTL_MINUTES};
pub use secret_record::SecretRecord;
