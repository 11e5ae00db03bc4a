//! RSA PKCS#1 v1.5 check.
//!
//! No plaintext is published for the vector, so the check decrypts it,
//! encrypts the result again and requires the second decryption to agree.
//! Padding bytes come from a seeded ChaCha20 stream so a run is repeatable.

use cipherprobe_crypto::RsaKeyPair;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use super::{Check, ensure_round_trip};
use crate::{AsymmetricVector, CheckError, CheckOutcome, codec::Hex};

/// Decrypt, re-encrypt and re-decrypt one RSA vector.
#[derive(Debug, Clone, Copy)]
pub struct AsymmetricCheck<'a> {
    vector: &'a AsymmetricVector,
    rsa_seed: u64,
}

impl<'a> AsymmetricCheck<'a> {
    /// Check `vector`, seeding padding randomness with `rsa_seed`.
    pub fn new(vector: &'a AsymmetricVector, rsa_seed: u64) -> Self {
        Self { vector, rsa_seed }
    }
}

impl Check for AsymmetricCheck<'_> {
    fn name(&self) -> &'static str {
        "AsymmetricCheck"
    }

    fn execute(&self) -> Result<CheckOutcome, CheckError> {
        let v = self.vector;
        let keys = RsaKeyPair::from_components(
            v.key.modulus.clone(),
            v.key.public_exponent.clone(),
            v.key.private_exponent.clone(),
        )?;
        let cipher = keys.cipher(v.transformation)?;
        let mut outcome = CheckOutcome::new(self.name());

        tracing::info!("Transformation: {}", v.transformation);
        tracing::info!("Modulus: {} bits", keys.modulus_bits());

        // Encodings are informational; failure to produce one is not a check failure.
        match keys.public_key_der() {
            Ok(der) => tracing::info!("Public key (SPKI): {}", Hex(&der)),
            Err(err) => tracing::warn!("Public key not encodable: {}", err),
        }
        match keys.private_key_der() {
            Ok(der) => tracing::info!("Private key (PKCS#8): {}", Hex(&der)),
            Err(err) => tracing::warn!("Private key not encodable: {}", err),
        }

        tracing::info!("Decrypting, encrypting, decrypting...");
        let plaintext = cipher.decrypt(&v.ciphertext)?;

        let mut rng = ChaCha20Rng::seed_from_u64(self.rsa_seed);
        let ciphertext = cipher.encrypt(&mut rng, &plaintext)?;
        let recovered = cipher.decrypt(&ciphertext)?;

        tracing::info!("Ciphertext: {}", Hex(&v.ciphertext));
        tracing::info!("Text: {}", Hex(&plaintext));
        tracing::info!("Ciphertext (2): {}", Hex(&ciphertext));
        tracing::info!("Text (2): {}", Hex(&recovered));

        ensure_round_trip("decrypt(encrypt(decrypt(input)))", &plaintext, &recovered)?;
        outcome.compare("round trip", &plaintext, &recovered);

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use cipherprobe_crypto::BigUint;
    use hex_literal::hex;

    use super::*;
    use crate::Catalog;

    #[test]
    fn standard_vector_round_trips() {
        let catalog = Catalog::standard().unwrap();
        let outcome = AsymmetricCheck::new(&catalog.asymmetric, 17).execute().unwrap();

        assert!(outcome.passed());
        assert_eq!(outcome.comparisons[0].computed, hex!("ABBA0304").to_vec());
    }

    #[test]
    fn seed_does_not_change_the_result() {
        let catalog = Catalog::standard().unwrap();
        let a = AsymmetricCheck::new(&catalog.asymmetric, 1).execute().unwrap();
        let b = AsymmetricCheck::new(&catalog.asymmetric, 2).execute().unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn broken_key_is_an_adapter_error() {
        let mut catalog = Catalog::standard().unwrap();
        catalog.asymmetric.key.private_exponent = BigUint::from(3u32);

        let err = AsymmetricCheck::new(&catalog.asymmetric, 17).execute().unwrap_err();
        assert_eq!(err.kind(), "Rsa");
        assert!(!err.is_violation());
    }

    #[test]
    fn non_rsa_transformation_is_unsupported() {
        let mut catalog = Catalog::standard().unwrap();
        catalog.asymmetric.transformation = "AES/ECB/NoPadding".parse().unwrap();

        let err = AsymmetricCheck::new(&catalog.asymmetric, 17).execute().unwrap_err();
        assert_eq!(err.kind(), "UnsupportedConfiguration");
    }
}
