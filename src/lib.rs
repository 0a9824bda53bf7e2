//! # MFA Core
//!
//! Core TOTP multi-factor authentication engine.
//! This crate contains the domain entities, enrollment and verification
//! services, storage interfaces, and error types for RFC 6238 one-time-code
//! authentication with anti-replay protection and failure-based lockout.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
