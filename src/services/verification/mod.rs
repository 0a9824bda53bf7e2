//! Verification service module for login-time TOTP checking.
//!
//! Drives the per-owner state machine `ACTIVE <-> LOCKED`:
//! - clock-tolerant code verification
//! - exactly-once consumption of a time window's code (anti-replay)
//! - failure counting with duration-based lockout
//! - verification token issuance through an injected capability

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationConfig;
pub use service::VerificationService;
pub use traits::VerificationTokenIssuer;
pub use types::VerifySuccess;
