//! Key-strength self-test.
//!
//! Confirms the Blowfish backend accepts keys of the lengths a deployment
//! would use by encrypting one block under each and decrypting it again.

use cipherprobe_crypto::{Transformation, decrypt, encrypt};

use crate::{CheckError, codec::Hex};

const TRANSFORMATION: &str = "Blowfish/ECB/NoPadding";
const DATA: [u8; 8] = [0x10, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];

/// Key lengths tried, in bits.
pub const KEY_BITS: [usize; 3] = [64, 128, 192];

/// Result for one key length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStrength {
    /// Key length in bits.
    pub bits: usize,
    /// Ciphertext on success, or why the key was refused.
    pub result: Result<Vec<u8>, CheckError>,
}

impl KeyStrength {
    /// The key length worked.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every key length tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    /// One entry per key length, in [`KEY_BITS`] order.
    pub strengths: Vec<KeyStrength>,
}

impl PreflightReport {
    /// Every key length worked.
    pub fn passed(&self) -> bool {
        self.strengths.iter().all(KeyStrength::passed)
    }
}

/// Encrypt and decrypt one block under each key length.
///
/// Failures are logged and recorded, never returned; the checks run either way.
pub fn run() -> PreflightReport {
    tracing::info!("Testing key strength with {}", TRANSFORMATION);

    let strengths = KEY_BITS
        .iter()
        .map(|&bits| {
            let result = try_key(bits);
            match &result {
                Ok(ciphertext) => {
                    tracing::info!("{} bit key: passed ({})", bits, Hex(ciphertext));
                },
                Err(err) => tracing::error!("{} bit key: failed: {}", bits, err),
            }
            KeyStrength { bits, result }
        })
        .collect();

    PreflightReport { strengths }
}

fn try_key(bits: usize) -> Result<Vec<u8>, CheckError> {
    let transformation: Transformation = TRANSFORMATION.parse()?;
    let key: Vec<u8> = (0..bits / 8).map(|i| (i % 256) as u8).collect();

    let ciphertext = encrypt(transformation, &key, None, &DATA)?;
    let recovered = decrypt(transformation, &key, None, &ciphertext)?;
    if recovered != DATA {
        return Err(CheckError::RoundTripFailure {
            stage: format!("{bits} bit key"),
            expected: Hex(&DATA).to_string(),
            actual: Hex(&recovered).to_string(),
        });
    }
    Ok(ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_key_lengths_pass() {
        let report = run();

        assert!(report.passed());
        let bits: Vec<_> = report.strengths.iter().map(|s| s.bits).collect();
        assert_eq!(bits, KEY_BITS.to_vec());
    }

    #[test]
    fn longer_keys_give_different_ciphertexts() {
        let report = run();
        let outputs: Vec<_> =
            report.strengths.iter().filter_map(|s| s.result.as_ref().ok()).collect();

        assert_eq!(outputs.len(), 3);
        assert_ne!(outputs[0], outputs[1]);
        assert_ne!(outputs[1], outputs[2]);
    }
}
