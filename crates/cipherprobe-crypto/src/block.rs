//! Block cipher transforms.
//!
//! [`BlockTransform`] binds a [`Transformation`], a direction, a key and an
//! optional IV, then runs any number of inputs through the RustCrypto mode
//! implementations (`ecb`, `cbc`).
//!
//! # Invariants
//!
//! - Key and IV are validated once in [`BlockTransform::new`]; `apply` only
//!   fails on the input itself.
//! - Unpadded input is never silently truncated or padded: misaligned or
//!   empty input fails with [`CryptoError::InvalidInputLength`] before the
//!   mode implementation sees it.

use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cipher::{
    BlockCipherDecrypt, BlockCipherEncrypt, BlockModeDecrypt, BlockModeEncrypt, KeyInit,
    KeyIvInit,
    block_padding::{NoPadding, Pkcs7},
    typenum::Unsigned,
};

use crate::{CipherAlgorithm, CryptoError, Mode, Padding, Transformation, XteaBigEndian};

/// Which way a transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

#[derive(Debug, Clone, Copy)]
enum Engine {
    Aes128,
    Aes192,
    Aes256,
    Xtea,
    Blowfish,
}

impl Engine {
    fn select(algorithm: CipherAlgorithm, key: &[u8]) -> Result<Self, CryptoError> {
        let engine = match (algorithm, key.len()) {
            (CipherAlgorithm::Aes, 16) => Self::Aes128,
            (CipherAlgorithm::Aes, 24) => Self::Aes192,
            (CipherAlgorithm::Aes, 32) => Self::Aes256,
            (CipherAlgorithm::Xtea, _) => Self::Xtea,
            (CipherAlgorithm::Blowfish, _) => Self::Blowfish,
            (CipherAlgorithm::Aes, len) => {
                return Err(CryptoError::InvalidKeyLength { algorithm: "AES", len });
            },
            (CipherAlgorithm::Rsa, _) => {
                return Err(CryptoError::unsupported("RSA is not a block cipher"));
            },
        };

        let accepted = match engine {
            Self::Aes128 | Self::Aes192 | Self::Aes256 => true,
            Self::Xtea => XteaBigEndian::new_from_slice(key).is_ok(),
            Self::Blowfish => <Blowfish as KeyInit>::new_from_slice(key).is_ok(),
        };
        if !accepted {
            return Err(CryptoError::InvalidKeyLength { algorithm: algorithm.name(), len: key.len() });
        }

        Ok(engine)
    }
}

/// A keyed block cipher transform in one direction.
#[derive(Debug, Clone)]
pub struct BlockTransform {
    transformation: Transformation,
    direction: Direction,
    engine: Engine,
    key: Vec<u8>,
    iv: Option<Vec<u8>>,
}

impl BlockTransform {
    /// Build a transform.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedConfiguration`] for RSA transformations
    /// - [`CryptoError::InvalidKeyLength`] if the cipher rejects the key
    /// - [`CryptoError::InvalidIvLength`] if CBC has no IV or one of the
    ///   wrong size, or ECB is given an IV
    pub fn new(
        transformation: Transformation,
        direction: Direction,
        key: &[u8],
        iv: Option<&[u8]>,
    ) -> Result<Self, CryptoError> {
        let engine = Engine::select(transformation.algorithm(), key)?;
        let block_size = transformation.block_size().unwrap_or_default();
        let mode = transformation.mode();

        match (mode.uses_iv(), iv) {
            (true, None) => {
                return Err(CryptoError::InvalidIvLength {
                    mode: mode.name(),
                    reason: "missing".to_string(),
                });
            },
            (true, Some(iv)) if iv.len() != block_size => {
                return Err(CryptoError::InvalidIvLength {
                    mode: mode.name(),
                    reason: format!("{} bytes, expected {block_size}", iv.len()),
                });
            },
            (false, Some(_)) => {
                return Err(CryptoError::InvalidIvLength {
                    mode: mode.name(),
                    reason: "mode takes no IV".to_string(),
                });
            },
            _ => {},
        }

        Ok(Self {
            transformation,
            direction,
            engine,
            key: key.to_vec(),
            iv: iv.map(<[u8]>::to_vec),
        })
    }

    /// The transformation this transform runs.
    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    /// Direction of the transform.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cipher block size in bytes.
    pub fn block_size(&self) -> usize {
        self.transformation.block_size().unwrap_or_default()
    }

    /// Run `input` through the transform.
    pub fn apply(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self.engine {
            Engine::Aes128 => self.run::<Aes128>(input),
            Engine::Aes192 => self.run::<Aes192>(input),
            Engine::Aes256 => self.run::<Aes256>(input),
            Engine::Xtea => self.run::<XteaBigEndian>(input),
            Engine::Blowfish => self.run::<Blowfish>(input),
        }
    }

    fn run<C>(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError>
    where
        C: BlockCipherEncrypt + BlockCipherDecrypt + KeyInit,
    {
        let key_error = |_| CryptoError::InvalidKeyLength {
            algorithm: self.transformation.algorithm().name(),
            len: self.key.len(),
        };
        let padding = self.transformation.padding();
        let iv = self.iv.as_deref().unwrap_or_default();

        match (self.transformation.mode(), self.direction) {
            (Mode::Ecb, Direction::Encrypt) => {
                let mode = ecb::Encryptor::<C>::new_from_slice(&self.key).map_err(key_error)?;
                encrypt_padded(mode, padding, input)
            },
            (Mode::Ecb, Direction::Decrypt) => {
                let mode = ecb::Decryptor::<C>::new_from_slice(&self.key).map_err(key_error)?;
                decrypt_padded(mode, padding, input)
            },
            (Mode::Cbc, Direction::Encrypt) => {
                let mode = cbc::Encryptor::<C>::new_from_slices(&self.key, iv).map_err(key_error)?;
                encrypt_padded(mode, padding, input)
            },
            (Mode::Cbc, Direction::Decrypt) => {
                let mode = cbc::Decryptor::<C>::new_from_slices(&self.key, iv).map_err(key_error)?;
                decrypt_padded(mode, padding, input)
            },
            (Mode::None, _) => Err(CryptoError::unsupported(self.transformation.to_string())),
        }
    }
}

fn encrypt_padded<M: BlockModeEncrypt>(
    mode: M,
    padding: Padding,
    input: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let block_size = M::BlockSize::USIZE;

    match padding {
        Padding::NoPadding => {
            if input.is_empty() || input.len() % block_size != 0 {
                return Err(CryptoError::InvalidInputLength { len: input.len(), block_size });
            }
            Ok(mode.encrypt_padded_vec::<NoPadding>(input))
        },
        Padding::Pkcs7 => Ok(mode.encrypt_padded_vec::<Pkcs7>(input)),
        Padding::Pkcs1 => Err(CryptoError::unsupported("PKCS1Padding on a block cipher")),
    }
}

fn decrypt_padded<M: BlockModeDecrypt>(
    mode: M,
    padding: Padding,
    input: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let block_size = M::BlockSize::USIZE;

    if input.is_empty() || input.len() % block_size != 0 {
        return Err(CryptoError::InvalidInputLength { len: input.len(), block_size });
    }

    match padding {
        Padding::NoPadding => mode
            .decrypt_padded_vec::<NoPadding>(input)
            .map_err(|_| CryptoError::InvalidInputLength { len: input.len(), block_size }),
        Padding::Pkcs7 => mode
            .decrypt_padded_vec::<Pkcs7>(input)
            .map_err(|_| CryptoError::BadPadding { padding: Padding::Pkcs7.name() }),
        Padding::Pkcs1 => Err(CryptoError::unsupported("PKCS1Padding on a block cipher")),
    }
}

/// Encrypt `input` in one call.
pub fn encrypt(
    transformation: Transformation,
    key: &[u8],
    iv: Option<&[u8]>,
    input: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    BlockTransform::new(transformation, Direction::Encrypt, key, iv)?.apply(input)
}

/// Decrypt `input` in one call.
pub fn decrypt(
    transformation: Transformation,
    key: &[u8],
    iv: Option<&[u8]>,
    input: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    BlockTransform::new(transformation, Direction::Decrypt, key, iv)?.apply(input)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    fn aes_ecb() -> Transformation {
        "AES/ECB/NoPadding".parse().unwrap()
    }

    fn xtea_cbc() -> Transformation {
        "XTEA/CBC/PKCS7Padding".parse().unwrap()
    }

    const AES_KEY: [u8; 16] = hex!("000102030405060708090A0B0C0D0E0F");
    const XTEA_KEY: [u8; 16] = hex!("66655666666556663331133333311333");
    const XTEA_IV: [u8; 8] = hex!("0706050403020100");

    #[test]
    fn aes_ecb_known_answer() {
        let input = hex!("719AEAA97C5A673B5C4B61E822F5E5F53280868F660CA2822488E8BDCA6AC6EB");
        let ct = encrypt(aes_ecb(), &AES_KEY, None, &input).unwrap();
        assert_eq!(ct, hex!("ACDC00000000000000000000000000000000000000000000000000000000ACDC"));
    }

    #[test]
    fn xtea_cbc_known_answer() {
        let ct = hex!("6294DF99EB4F242942FCCC8291FB9CC463788C13122A1D80");
        let pt = decrypt(xtea_cbc(), &XTEA_KEY, Some(&XTEA_IV), &ct).unwrap();
        assert_eq!(pt, hex!("ABBA00000000000010111213140000000000ACDC00"));
    }

    #[test]
    fn unpadded_misaligned_input_is_rejected() {
        let err = encrypt(aes_ecb(), &AES_KEY, None, &[0u8; 15]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidInputLength { len: 15, block_size: 16 });
    }

    #[test]
    fn unpadded_empty_input_is_rejected() {
        let err = encrypt(aes_ecb(), &AES_KEY, None, &[]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidInputLength { len: 0, block_size: 16 });
    }

    #[test]
    fn padded_decrypt_rejects_partial_block() {
        let err = decrypt(xtea_cbc(), &XTEA_KEY, Some(&XTEA_IV), &[0u8; 12]).unwrap_err();
        assert_eq!(err, CryptoError::InvalidInputLength { len: 12, block_size: 8 });
    }

    #[test]
    fn aes_key_size_selects_variant() {
        let t = aes_ecb();
        assert!(BlockTransform::new(t, Direction::Encrypt, &[0u8; 24], None).is_ok());
        assert!(BlockTransform::new(t, Direction::Encrypt, &[0u8; 32], None).is_ok());

        let err = BlockTransform::new(t, Direction::Encrypt, &[0u8; 20], None).unwrap_err();
        assert_eq!(err, CryptoError::InvalidKeyLength { algorithm: "AES", len: 20 });
    }

    #[test]
    fn cbc_requires_iv() {
        let err = BlockTransform::new(xtea_cbc(), Direction::Decrypt, &XTEA_KEY, None).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidIvLength { mode: "CBC", .. }));

        let short = [0u8; 4];
        let err =
            BlockTransform::new(xtea_cbc(), Direction::Decrypt, &XTEA_KEY, Some(&short)).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidIvLength { .. }));
    }

    #[test]
    fn ecb_refuses_iv() {
        let err = BlockTransform::new(aes_ecb(), Direction::Encrypt, &AES_KEY, Some(&[0u8; 16]))
            .unwrap_err();
        assert!(matches!(err, CryptoError::InvalidIvLength { mode: "ECB", .. }));
    }

    #[test]
    fn rsa_is_not_a_block_transform() {
        let t = "RSA/None/PKCS1Padding".parse().unwrap();
        let err = BlockTransform::new(t, Direction::Encrypt, &AES_KEY, None).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn blowfish_accepts_variable_keys() {
        let t: Transformation = "Blowfish/ECB/NoPadding".parse().unwrap();
        let data = hex!("1001020304050607");
        for len in [8usize, 16, 24] {
            let key: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let ct = encrypt(t, &key, None, &data).unwrap();
            assert_eq!(decrypt(t, &key, None, &ct).unwrap(), data);
        }
        assert!(BlockTransform::new(t, Direction::Encrypt, &[0u8; 57], None).is_err());
    }
}
