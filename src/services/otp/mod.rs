//! TOTP code generation and verification (RFC 4226 / RFC 6238).
//!
//! This module is pure: no I/O, no mutable state. Given the same secret and
//! time it always produces the same code.

mod config;
mod generator;

pub use config::TotpConfig;
pub use generator::TotpGenerator;
