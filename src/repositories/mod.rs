//! Storage interfaces for MFA state, plus in-memory implementations.

pub mod challenge;
pub mod secret;

pub use challenge::{ChallengeStore, InMemoryChallengeStore};
pub use secret::{InMemorySecretStore, SecretStore};
