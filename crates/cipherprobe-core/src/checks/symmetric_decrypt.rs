//! CBC decryption check.
//!
//! In CBC the IV is XORed into the first decrypted block only. Flipping an
//! IV bit must therefore flip the same bit of the first plaintext block and
//! leave every later block intact; anything else is an
//! [`AvalancheInvariantViolation`](CheckError::AvalancheInvariantViolation).

use cipherprobe_crypto::{BlockTransform, CryptoError, Direction, Padding, Transformation};

use super::{Check, ensure_round_trip};
use crate::{
    CheckError, CheckOutcome, Finding, TestVector,
    codec::Hex,
    model::{Buffer, Perturbation, PerturbationResult},
};

/// Round trip, known answer, propagation and IV-locality probes for a padded
/// CBC cipher.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricDecryptCheck<'a> {
    vector: &'a TestVector,
}

impl<'a> SymmetricDecryptCheck<'a> {
    /// Check against `vector`, whose input is a ciphertext.
    pub fn new(vector: &'a TestVector) -> Self {
        Self { vector }
    }
}

/// Fails unless an IV perturbation changed the first block and nothing else.
fn ensure_iv_locality(probe: &PerturbationResult) -> Result<(), CheckError> {
    if probe.divergence.confined_to(&[0]) {
        return Ok(());
    }
    Err(CheckError::AvalancheInvariantViolation {
        perturbation: probe.perturbation.to_string(),
        blocks: probe.divergence.changed_blocks.clone(),
    })
}

impl Check for SymmetricDecryptCheck<'_> {
    fn name(&self) -> &'static str {
        "SymmetricDecryptCheck"
    }

    fn execute(&self) -> Result<CheckOutcome, CheckError> {
        let v = self.vector;
        let block_size = v.block_size();
        let iv = v.iv.as_deref();
        let decryptor = BlockTransform::new(v.transformation, Direction::Decrypt, &v.key, iv)?;
        let encryptor = BlockTransform::new(v.transformation, Direction::Encrypt, &v.key, iv)?;
        let mut outcome = CheckOutcome::new(self.name());

        tracing::info!("Transformation: {}", v.transformation);
        tracing::info!("Key: {}", Hex(&v.key));
        tracing::info!("IV: {}", Hex(iv.unwrap_or_default()));
        tracing::info!("Decrypting and encrypting...");

        let plaintext = decryptor.apply(&v.input)?;
        let reencrypted = encryptor.apply(&plaintext)?;

        tracing::info!("Ciphertext: {}", Hex(&v.input));
        tracing::info!("Text: {}", Hex(&plaintext));
        tracing::info!("Ciphertext (2): {}", Hex(&reencrypted));

        ensure_round_trip("encrypt(decrypt(input))", &v.input, &reencrypted)?;
        outcome.compare("round trip", &v.input, &reencrypted);

        if let Some(expected) = &v.expected
            && !outcome.compare("plaintext", expected, &plaintext)
        {
            outcome.find(Finding::KnownAnswerMismatch {
                label: format!("{} plaintext", v.name),
                expected: Hex(expected).to_string(),
                computed: Hex(&plaintext).to_string(),
            });
        }

        if plaintext.is_empty() {
            tracing::info!("Text is empty, nothing to modify");
        } else {
            tracing::info!("Modifying last byte of text, encrypting...");
            let flip = Perturbation::flip_last(Buffer::Plaintext, plaintext.len());
            let modified = encryptor.apply(&flip.apply(&plaintext))?;
            outcome.probe(PerturbationResult::new(flip, v.input.clone(), modified, block_size));
        }

        tracing::info!("Modifying first byte of ciphertext, decrypting...");
        let flip = Perturbation::flip(Buffer::Ciphertext, 0, 0);
        match decryptor.apply(&flip.apply(&v.input)) {
            Ok(corrupted) => {
                let result = PerturbationResult::new(flip, plaintext, corrupted, block_size);
                let probe = outcome.probe(result);
                tracing::info!(
                    "Corruption confined to blocks 0 and 1: {}",
                    probe.divergence.confined_to(&[0, 1])
                );
            },
            Err(err @ CryptoError::BadPadding { .. }) => {
                tracing::info!("Corrupted ciphertext rejected: {}", err);
                outcome.reject(flip, err);
            },
            Err(err) => return Err(err.into()),
        }

        // Compared before unpadding, so a flip in the pad bytes still counts.
        tracing::info!("Modifying last byte of IV, decrypting...");
        let t = v.transformation;
        let unpadded = Transformation::new(t.algorithm(), t.mode(), Padding::NoPadding)?;
        let raw = BlockTransform::new(unpadded, Direction::Decrypt, &v.key, iv)?.apply(&v.input)?;

        let flip = Perturbation::flip_last(Buffer::Iv, iv.map_or(0, <[u8]>::len));
        let flipped_iv = flip.apply(iv.unwrap_or_default());
        let shifted = BlockTransform::new(unpadded, Direction::Decrypt, &v.key, Some(&flipped_iv))?
            .apply(&v.input)?;
        let probe = outcome.probe(PerturbationResult::new(flip, raw, shifted, block_size));
        ensure_iv_locality(probe)?;

        Ok(outcome)
    }
}
