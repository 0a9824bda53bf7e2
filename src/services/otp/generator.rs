//! TOTP generator using HMAC-SHA1.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::Sha1;

use crate::errors::{MfaError, MfaResult};

use super::config::TotpConfig;

/// Stateless RFC 6238 code generator and verifier.
///
/// Secrets are handled in their base32 text form (RFC 4648, no padding), the
/// same form they are stored and provisioned in. A secret that fails to
/// decode is a configuration fault, surfaced as [`MfaError::MalformedSecret`]
/// and never retried.
pub struct TotpGenerator {
    config: TotpConfig,
}

impl TotpGenerator {
    pub fn new(config: TotpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TotpConfig {
        &self.config
    }

    /// Generates a new shared secret from the OS CSPRNG, base32-encoded.
    pub fn generate_secret(&self) -> MfaResult<String> {
        let mut bytes = vec![0u8; self.config.secret_length];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| MfaError::SecretGeneration {
                message: e.to_string(),
            })?;
        Ok(base32::encode(
            base32::Alphabet::Rfc4648 { padding: false },
            &bytes,
        ))
    }

    /// Computes the code for an explicit time-step counter.
    ///
    /// HMAC-SHA1 over the 8-byte big-endian counter, RFC 4226 dynamic
    /// truncation, reduced modulo `10^digits` and left-zero-padded.
    pub fn compute_code(&self, secret: &str, counter: i64) -> MfaResult<String> {
        let secret_bytes = self.decode_secret(secret)?;
        self.compute_code_raw(&secret_bytes, counter)
    }

    /// Computes the code for the time step containing `now`.
    pub fn current_code(&self, secret: &str, now: DateTime<Utc>) -> MfaResult<String> {
        self.compute_code(secret, self.counter_at(now))
    }

    /// Checks `candidate` against the codes for counters within
    /// `[-window, +window]` of the step containing `now`.
    ///
    /// Comparison is constant-time; the first match wins.
    pub fn verify(
        &self,
        secret: &str,
        candidate: &str,
        now: DateTime<Utc>,
        window: i64,
    ) -> MfaResult<bool> {
        let secret_bytes = self.decode_secret(secret)?;
        let counter_now = self.counter_at(now);

        for offset in -window..=window {
            let code = self.compute_code_raw(&secret_bytes, counter_now + offset)?;
            if constant_time_eq(code.as_bytes(), candidate.as_bytes()) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Builds the `otpauth://` provisioning URI for QR scanning.
    ///
    /// The format is consumed byte-for-byte by authenticator apps; do not
    /// reorder or add parameters.
    pub fn provisioning_uri(&self, secret: &str, account_label: &str, issuer_label: &str) -> String {
        format!(
            "otpauth://totp/{}?secret={}&issuer={}&digits={}&period={}",
            account_label, secret, issuer_label, self.config.digits, self.config.step_seconds
        )
    }

    /// Time-step counter containing `now`.
    pub fn counter_at(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp().div_euclid(self.config.step_seconds)
    }

    fn decode_secret(&self, secret: &str) -> MfaResult<Vec<u8>> {
        base32::decode(base32::Alphabet::Rfc4648 { padding: false }, secret).ok_or_else(|| {
            MfaError::MalformedSecret {
                message: "secret is not valid unpadded base32".to_string(),
            }
        })
    }

    fn compute_code_raw(&self, secret_bytes: &[u8], counter: i64) -> MfaResult<String> {
        let counter_bytes = (counter as u64).to_be_bytes();

        let mut mac =
            Hmac::<Sha1>::new_from_slice(secret_bytes).map_err(|e| MfaError::MalformedSecret {
                message: e.to_string(),
            })?;
        mac.update(&counter_bytes);
        let hash = mac.finalize().into_bytes();

        // Dynamic truncation (RFC 4226 §5.3): low 4 bits of the last byte
        // select a 4-byte slice, masked to 31 bits.
        let offset = (hash[hash.len() - 1] & 0x0f) as usize;
        let binary = ((hash[offset] as u32 & 0x7f) << 24)
            | ((hash[offset + 1] as u32) << 16)
            | ((hash[offset + 2] as u32) << 8)
            | (hash[offset + 3] as u32);

        let code = binary % 10u32.pow(self.config.digits);
        Ok(format!(
            "{:0width$}",
            code,
            width = self.config.digits as usize
        ))
    }
}

impl Default for TotpGenerator {
    fn default() -> Self {
        Self::new(TotpConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(timestamp: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(timestamp, 0).unwrap()
    }

    fn rfc6238_secret() -> String {
        // RFC 6238 test key: ASCII "12345678901234567890"
        base32::encode(
            base32::Alphabet::Rfc4648 { padding: false },
            b"12345678901234567890",
        )
    }

    #[test]
    fn test_rfc6238_reference_vectors() {
        let generator = TotpGenerator::new(TotpConfig {
            digits: 8,
            ..TotpConfig::default()
        });
        let secret = rfc6238_secret();

        assert_eq!(generator.current_code(&secret, at(59)).unwrap(), "94287082");
        assert_eq!(
            generator.current_code(&secret, at(1111111109)).unwrap(),
            "07081804"
        );
        assert_eq!(
            generator.current_code(&secret, at(1234567890)).unwrap(),
            "89005924"
        );
    }

    #[test]
    fn test_code_is_zero_padded_to_digit_count() {
        let generator = TotpGenerator::default();
        let secret = "JBSWY3DPEHPK3PXP";

        // Sweep enough counters that at least some codes have leading zeros.
        for counter in 0..200 {
            let code = generator.compute_code(secret, counter).unwrap();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_current_code_verifies_with_zero_window() {
        let generator = TotpGenerator::default();
        let secret = "JBSWY3DPEHPK3PXP";
        let now = at(1_700_000_000);

        let code = generator.current_code(secret, now).unwrap();
        assert!(generator.verify(secret, &code, now, 0).unwrap());
    }

    #[test]
    fn test_window_tolerance_accepts_adjacent_steps_only() {
        let generator = TotpGenerator::default();
        let secret = "JBSWY3DPEHPK3PXP";
        let now = at(1_700_000_000);
        let counter = generator.counter_at(now);

        let previous = generator.compute_code(secret, counter - 1).unwrap();
        let next = generator.compute_code(secret, counter + 1).unwrap();
        let stale = generator.compute_code(secret, counter - 2).unwrap();

        assert!(generator.verify(secret, &previous, now, 1).unwrap());
        assert!(generator.verify(secret, &next, now, 1).unwrap());
        assert!(!generator.verify(secret, &stale, now, 1).unwrap());
    }

    #[test]
    fn test_drifted_clock_scenario() {
        let generator = TotpGenerator::default();
        let secret = "JBSWY3DPEHPK3PXP";
        let t = at(1_700_000_000);

        let code = generator.current_code(secret, t).unwrap();

        // 5 seconds of drift stays within the tolerance window.
        assert!(generator
            .verify(secret, &code, at(1_700_000_005), 1)
            .unwrap());
        // 95 seconds later the code is three windows old.
        assert!(!generator
            .verify(secret, &code, at(1_700_000_095), 1)
            .unwrap());
    }

    #[test]
    fn test_generate_secret_decodes_to_configured_length() {
        let generator = TotpGenerator::default();
        let secret = generator.generate_secret().unwrap();

        let bytes =
            base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &secret).unwrap();
        assert_eq!(bytes.len(), 20);
    }

    #[test]
    fn test_generated_secrets_are_unique() {
        let generator = TotpGenerator::default();
        let a = generator.generate_secret().unwrap();
        let b = generator.generate_secret().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_secret_is_fatal() {
        let generator = TotpGenerator::default();
        let result = generator.compute_code("not!base32@", 0);

        assert!(matches!(result, Err(MfaError::MalformedSecret { .. })));
    }

    #[test]
    fn test_provisioning_uri_format_is_exact() {
        let generator = TotpGenerator::default();
        let uri = generator.provisioning_uri("JBSWY3DPEHPK3PXP", "user@example.com", "ExampleApp");

        assert_eq!(
            uri,
            "otpauth://totp/user@example.com?secret=JBSWY3DPEHPK3PXP&issuer=ExampleApp&digits=6&period=30"
        );
    }
}
