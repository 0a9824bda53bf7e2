//! Domain layer containing the MFA enrollment entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
