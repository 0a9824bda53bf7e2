//! Enrollment service module for TOTP secret setup.
//!
//! Drives the per-owner state machine
//! `NOT_SETUP -> PENDING_VERIFICATION -> ACTIVE`:
//! - secret generation and provisioning URI creation
//! - short-lived challenge issuance with exactly-once consumption
//! - correct-code activation with one-time backup codes
//! - idempotent removal

mod backup;
mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use backup::generate_backup_codes;
pub use config::EnrollmentConfig;
pub use service::EnrollmentService;
pub use types::{CompleteSetupResult, InitSetupResult, RemoveSetupOutcome};
