//! RSA with PKCS#1 v1.5 encryption padding.
//!
//! Keys are built from fixed `(n, e, d)` components; the primes are recovered
//! by the `rsa` crate. Encryption needs randomness for the padding string,
//! which the caller supplies so runs can be reproduced with a seeded RNG.

use rsa::{
    BigUint, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey,
    pkcs8::{EncodePrivateKey, EncodePublicKey},
    rand_core::CryptoRngCore,
    traits::PublicKeyParts,
};

use crate::{CipherAlgorithm, CryptoError, Mode, Padding, Transformation};

/// RSA key pair built from its components.
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl RsaKeyPair {
    /// Build a key pair from modulus and exponents.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Rsa`] if the primes cannot be recovered or the key
    /// fails validation.
    pub fn from_components(
        modulus: BigUint,
        public_exponent: BigUint,
        private_exponent: BigUint,
    ) -> Result<Self, CryptoError> {
        let public =
            RsaPublicKey::new(modulus.clone(), public_exponent.clone()).map_err(CryptoError::rsa)?;
        let private =
            RsaPrivateKey::from_components(modulus, public_exponent, private_exponent, Vec::new())
                .map_err(CryptoError::rsa)?;

        Ok(Self { private, public })
    }

    /// Modulus size in bits.
    pub fn modulus_bits(&self) -> usize {
        self.public.n().bits()
    }

    /// SPKI DER encoding of the public key.
    pub fn public_key_der(&self) -> Result<Vec<u8>, CryptoError> {
        let doc = self.public.to_public_key_der().map_err(CryptoError::rsa)?;
        Ok(doc.as_bytes().to_vec())
    }

    /// PKCS#8 DER encoding of the private key.
    pub fn private_key_der(&self) -> Result<Vec<u8>, CryptoError> {
        let doc = self.private.to_pkcs8_der().map_err(CryptoError::rsa)?;
        Ok(doc.as_bytes().to_vec())
    }

    /// Bind the key pair to a transformation.
    ///
    /// Only `RSA/None/PKCS1Padding` is accepted.
    pub fn cipher(&self, transformation: Transformation) -> Result<RsaCipher<'_>, CryptoError> {
        let supported = transformation.algorithm() == CipherAlgorithm::Rsa
            && transformation.mode() == Mode::None
            && transformation.padding() == Padding::Pkcs1;

        if !supported {
            return Err(CryptoError::unsupported(transformation.to_string()));
        }

        Ok(RsaCipher { keys: self })
    }
}

/// RSA key pair bound to PKCS#1 v1.5 encryption padding.
#[derive(Debug, Clone, Copy)]
pub struct RsaCipher<'a> {
    keys: &'a RsaKeyPair,
}

impl RsaCipher<'_> {
    /// Encrypt with the public key.
    pub fn encrypt<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        self.keys.public.encrypt(rng, Pkcs1v15Encrypt, plaintext).map_err(CryptoError::rsa)
    }

    /// Decrypt with the private key and strip the padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.keys.private.decrypt(Pkcs1v15Encrypt, ciphertext).map_err(CryptoError::rsa)
    }
}
