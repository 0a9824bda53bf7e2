//! One-time backup code generation.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::{MfaError, MfaResult};

/// Generates `count` one-time backup codes in `XXXX-XXXX` hex form.
///
/// Material comes from the OS CSPRNG; a provider failure is fatal and
/// surfaced as [`MfaError::SecretGeneration`].
pub fn generate_backup_codes(count: usize) -> MfaResult<Vec<String>> {
    let mut codes = Vec::with_capacity(count);

    for _ in 0..count {
        let mut bytes = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| MfaError::SecretGeneration {
                message: e.to_string(),
            })?;
        codes.push(format!(
            "{:04X}-{:04X}",
            u16::from_be_bytes([bytes[0], bytes[1]]),
            u16::from_be_bytes([bytes[2], bytes[3]])
        ));
    }

    Ok(codes)
}
