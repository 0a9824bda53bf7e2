//! Enrollment challenge store module.

mod r#trait;
pub use r#trait::ChallengeStore;

mod memory;
pub use memory::InMemoryChallengeStore;
