//! Configuration for TOTP code generation

/// Configuration for TOTP code generation and verification
#[derive(Debug, Clone)]
pub struct TotpConfig {
    /// Length of a time step in seconds
    pub step_seconds: i64,
    /// Number of decimal digits in a code
    pub digits: u32,
    /// Number of adjacent time steps accepted on either side of "now",
    /// absorbing clock drift between authenticator and server
    pub window_tolerance: i64,
    /// Length of a freshly generated shared secret in bytes
    pub secret_length: usize,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            step_seconds: 30,
            digits: 6,
            window_tolerance: 1,
            secret_length: 20,
        }
    }
}
