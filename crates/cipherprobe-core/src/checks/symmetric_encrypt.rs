//! ECB encryption check.
//!
//! ECB encrypts every block independently, so a change in one plaintext or
//! ciphertext block stays in that block. Without padding the cipher cannot
//! accept partial blocks at all, and the adapter must say so rather than pad
//! or truncate.

use cipherprobe_crypto::{BlockTransform, CryptoError, Direction};

use super::{Check, ensure_round_trip};
use crate::{
    CheckError, CheckOutcome, Finding, TestVector,
    codec::Hex,
    model::{Buffer, Perturbation, PerturbationResult},
};

/// Round trip, known answer and locality probes for an unpadded ECB cipher.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricEncryptCheck<'a> {
    vector: &'a TestVector,
}

impl<'a> SymmetricEncryptCheck<'a> {
    /// Check against `vector`, whose input is a plaintext.
    pub fn new(vector: &'a TestVector) -> Self {
        Self { vector }
    }
}

impl Check for SymmetricEncryptCheck<'_> {
    fn name(&self) -> &'static str {
        "SymmetricEncryptCheck"
    }

    fn execute(&self) -> Result<CheckOutcome, CheckError> {
        let v = self.vector;
        let block_size = v.block_size();
        let iv = v.iv.as_deref();
        let encryptor = BlockTransform::new(v.transformation, Direction::Encrypt, &v.key, iv)?;
        let decryptor = BlockTransform::new(v.transformation, Direction::Decrypt, &v.key, iv)?;
        let mut outcome = CheckOutcome::new(self.name());

        tracing::info!("Transformation: {}", v.transformation);
        tracing::info!("Key: {}", Hex(&v.key));
        tracing::info!("Encrypting and decrypting...");

        let ciphertext = encryptor.apply(&v.input)?;
        let recovered = decryptor.apply(&ciphertext)?;

        tracing::info!("Text: {}", Hex(&v.input));
        tracing::info!("Ciphertext: {}", Hex(&ciphertext));
        tracing::info!("Text (2): {}", Hex(&recovered));

        ensure_round_trip("decrypt(encrypt(input))", &v.input, &recovered)?;
        outcome.compare("round trip", &v.input, &recovered);

        if let Some(expected) = &v.expected
            && !outcome.compare("ciphertext", expected, &ciphertext)
        {
            outcome.find(Finding::KnownAnswerMismatch {
                label: format!("{} ciphertext", v.name),
                expected: Hex(expected).to_string(),
                computed: Hex(&ciphertext).to_string(),
            });
        }

        tracing::info!("Modifying first byte of input, encrypting, decrypting...");
        let flip = Perturbation::flip(Buffer::Plaintext, 0, 0);
        let modified = flip.apply(&v.input);
        let modified_ciphertext = encryptor.apply(&modified)?;
        let recovered = decryptor.apply(&modified_ciphertext)?;
        ensure_round_trip("decrypt(encrypt(modified input))", &modified, &recovered)?;

        let probe = outcome.probe(PerturbationResult::new(
            flip,
            ciphertext.clone(),
            modified_ciphertext,
            block_size,
        ));
        tracing::info!(
            "Change confined to first ciphertext block: {}",
            probe.divergence.confined_to(&[0])
        );

        tracing::info!("Shortening input, encrypting...");
        let len = v.input.len();
        let aligned =
            Perturbation::truncate(Buffer::Plaintext, len, len.saturating_sub(block_size));
        match encryptor.apply(&aligned.apply(&v.input)) {
            Ok(shortened) => {
                let result =
                    PerturbationResult::new(aligned, ciphertext.clone(), shortened, block_size);
                outcome.probe(result);
            },
            Err(err @ CryptoError::InvalidInputLength { .. }) => outcome.reject(aligned, err),
            Err(err) => return Err(err.into()),
        }

        let misaligned =
            Perturbation::truncate(Buffer::Plaintext, len, len.saturating_sub(block_size + 1));
        match encryptor.apply(&misaligned.apply(&v.input)) {
            Err(err @ CryptoError::InvalidInputLength { .. }) => outcome.reject(misaligned, err),
            Err(err) => return Err(err.into()),
            Ok(_) => {
                return Err(CheckError::MissingExpectedError {
                    perturbation: misaligned.to_string(),
                    expected: "InvalidInputLength",
                });
            },
        }

        tracing::info!("Modifying ciphertext, decrypting...");
        let flip = Perturbation::flip(Buffer::Ciphertext, 0, 0);
        let corrupted = decryptor.apply(&flip.apply(&ciphertext))?;
        let probe =
            outcome.probe(PerturbationResult::new(flip, v.input.clone(), corrupted, block_size));
        tracing::info!(
            "Corruption confined to first plaintext block: {}",
            probe.divergence.confined_to(&[0])
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    #[test]
    fn standard_vector_passes() {
        let catalog = Catalog::standard().unwrap();
        let outcome = SymmetricEncryptCheck::new(&catalog.symmetric_encrypt).execute().unwrap();

        assert!(outcome.passed(), "{outcome:?}");
        assert_eq!(outcome.comparisons.len(), 2);
    }

    #[test]
    fn plaintext_flip_changes_first_block_only() {
        let catalog = Catalog::standard().unwrap();
        let outcome = SymmetricEncryptCheck::new(&catalog.symmetric_encrypt).execute().unwrap();

        let probe = &outcome.perturbations[0];
        assert_eq!(probe.perturbation, Perturbation::flip(Buffer::Plaintext, 0, 0));
        assert_eq!(probe.divergence.changed_blocks, vec![0]);
        assert_eq!(probe.divergence.common_prefix, 0);
    }

    #[test]
    fn truncation_probes() {
        let catalog = Catalog::standard().unwrap();
        let outcome = SymmetricEncryptCheck::new(&catalog.symmetric_encrypt).execute().unwrap();

        // one whole block dropped: still aligned, output is a prefix
        let aligned = &outcome.perturbations[1];
        assert_eq!(aligned.perturbation, Perturbation::truncate(Buffer::Plaintext, 32, 16));
        assert_eq!(aligned.perturbed.len(), 16);
        assert_eq!(aligned.divergence.common_prefix, 16);

        // one block and one byte dropped: rejected
        assert_eq!(outcome.rejections.len(), 1);
        assert_eq!(
            outcome.rejections[0].error,
            CryptoError::InvalidInputLength { len: 15, block_size: 16 }
        );
    }

    #[test]
    fn ciphertext_flip_corrupts_one_block() {
        let catalog = Catalog::standard().unwrap();
        let outcome = SymmetricEncryptCheck::new(&catalog.symmetric_encrypt).execute().unwrap();

        let probe = &outcome.perturbations[2];
        assert_eq!(probe.perturbation.buffer(), Buffer::Ciphertext);
        assert_eq!(probe.divergence.changed_blocks, vec![0]);
        assert_eq!(&probe.perturbed[16..], &catalog.symmetric_encrypt.input[16..]);
    }

    #[test]
    fn wrong_known_answer_is_a_finding() {
        let mut catalog = Catalog::standard().unwrap();
        catalog.symmetric_encrypt.expected = Some(vec![0u8; 32]);

        let outcome = SymmetricEncryptCheck::new(&catalog.symmetric_encrypt).execute().unwrap();
        assert!(!outcome.passed());
        assert!(matches!(outcome.findings[0], Finding::KnownAnswerMismatch { .. }));
    }

    #[test]
    fn padded_cipher_accepting_partial_block_fails() {
        let base = Catalog::standard().unwrap().symmetric_encrypt;
        let vector = TestVector {
            transformation: "AES/ECB/PKCS7Padding".parse().unwrap(),
            expected: None,
            ..base
        };

        let err = SymmetricEncryptCheck::new(&vector).execute().unwrap_err();
        assert_eq!(err.kind(), "MissingExpectedError");
        assert!(err.is_violation());
        assert_eq!(
            err,
            CheckError::MissingExpectedError {
                perturbation: "plaintext truncated from 32 to 15 bytes".to_string(),
                expected: "InvalidInputLength",
            }
        );
    }
}
