//! Vector catalog
//!
//! The fixed literals every check runs against. Literals are kept as hex
//! text in the grouping they are published in and decoded once into a
//! [`Catalog`], which checks borrow read-only for the rest of the run.
//!
//! # Invariants
//!
//! - Every transformation and algorithm name resolves in the adapter.
//! - Keys and IVs are accepted by their cipher.
//! - Inputs that must be block aligned (unpadded plaintext, any ciphertext)
//!   are block aligned.
//!
//! A violation is a [`CatalogError`] at construction, never a check failure.

use cipherprobe_crypto::{
    BigUint, BlockTransform, Direction, HashAlgorithm, MacAlgorithm, Padding, Transformation,
};

use crate::{CatalogError, codec};

const AES_ECB_TRANSFORMATION: &str = "AES/ECB/NoPadding";
const AES_ECB_KEY: &str = "0001020304050607 08090A0B0C0D0E0F";
const AES_ECB_PLAINTEXT: &str =
    "719AEAA97C5A673B 5C4B61E822F5E5F5 3280868F660CA282 2488E8BDCA6AC6EB";
const AES_ECB_CIPHERTEXT: &str =
    "ACDC000000000000 0000000000000000 0000000000000000 000000000000ACDC";

const XTEA_CBC_TRANSFORMATION: &str = "xTEA/CBC/PKCS7Padding";
const XTEA_CBC_KEY: &str = "6665566666655666 3331133333311333";
const XTEA_CBC_IV: &str = "0706050403020100";
const XTEA_CBC_CIPHERTEXT: &str = "6294DF99EB4F2429 42FCCC8291FB9CC4 63788C13122A1D80";
const XTEA_CBC_PLAINTEXT: &str = "ABBA000000000000 1011121314000000 0000ACDC00";

/// (algorithm, text, expected digest)
const DIGESTS: [(&str, &str, &str); 3] = [
    (
        "Tiger",
        "FACE000004050607 08090A0B0C0D00",
        "983FB88C4524C020 A5957B416C16FD49 1A4CBA8909583C",
    ),
    (
        "RipeMD320",
        "ABBA000004050607 08090A0B0C0D50",
        "85399BCEC86662AA 1379862A91CB79E7 D50C1050CCEC2726 C9B086F44735B134 FB44BB8BA99B326D",
    ),
    ("RipeMD128", "BABCE00004050607 08090A0B0C0D0E", "82C9967ED8C8453D F46CED7238FA67D3"),
];

/// (algorithm, key, text, expected MAC)
const MACS: [(&str, &str, &str, &str); 3] = [
    (
        "HMac-RipeMD160",
        "7132333435363738 393A",
        "DAFF000000010203 040506070809",
        "7AE7819F782E54B7 4FC53C55C6B372AF 5A1064FF",
    ),
    (
        "HmacSHA384",
        "5172333435363738 393A",
        "FACEB00000010203 040506070809",
        "A828DE429941828E 1837FF67003DAFFC 8AD64C82BFFFB3FB \
         0C85E654596CB60D 8B0B47906D1AEC18 4AAEC73AED5ADE4F",
    ),
    ("HmacSHA1", "517233343536", "BABCE00000010203 040500", "D634AE8023C5957E D5178A0DD37EAD81 A7A77B76"),
];

const RSA_TRANSFORMATION: &str = "RSA/None/PKCS1Padding";
const RSA_MODULUS: &str =
    "00B3446AF443CD84 13C155114359C501 DF6616282F89F3B1 78CFB62B689E899E 03";
const RSA_PUBLIC_EXPONENT: &str = "010001";
const RSA_PRIVATE_EXPONENT: &str =
    "3D4224F641712A30 0201CABB6422B127 8E7008C9D6D3AFA6 3A67D919CED15719";
const RSA_CIPHERTEXT: &str =
    "1F0E15B0D491DB7B 6C8F66883E809CE1 7F8CC510C314E320 2D0811455E335DA7";

fn decode(name: &'static str, text: &str) -> Result<Vec<u8>, CatalogError> {
    codec::decode(text).map_err(|source| CatalogError::MalformedHexInput { name, source })
}

/// Symmetric cipher vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    /// Short identifier used in logs.
    pub name: &'static str,
    /// Algorithm, mode and padding.
    pub transformation: Transformation,
    /// Operation the vector exercises; `input` is its input.
    pub direction: Direction,
    /// Cipher key.
    pub key: Vec<u8>,
    /// IV, present only for chained modes.
    pub iv: Option<Vec<u8>>,
    /// Plaintext for encryption vectors, ciphertext for decryption vectors.
    pub input: Vec<u8>,
    /// Known output of `direction` applied to `input`, if published.
    pub expected: Option<Vec<u8>>,
}

impl TestVector {
    /// Decode and validate a symmetric vector.
    pub fn new(
        name: &'static str,
        transformation: &str,
        direction: Direction,
        key: &str,
        iv: Option<&str>,
        input: &str,
        expected: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let invalid = |source| CatalogError::InvalidVector { name, source };

        let transformation: Transformation = transformation.parse().map_err(invalid)?;
        let key = decode(name, key)?;
        let iv = iv.map(|iv| decode(name, iv)).transpose()?;
        let input = decode(name, input)?;
        let expected = expected.map(|e| decode(name, e)).transpose()?;

        let transform = BlockTransform::new(transformation, direction, &key, iv.as_deref())
            .map_err(invalid)?;
        let block_size = transform.block_size();
        let must_align =
            direction == Direction::Decrypt || transformation.padding() == Padding::NoPadding;

        if must_align && input.len() % block_size != 0 {
            return Err(CatalogError::Misaligned { name, len: input.len(), block_size });
        }

        Ok(Self { name, transformation, direction, key, iv, input, expected })
    }

    /// Cipher block size in bytes.
    pub fn block_size(&self) -> usize {
        self.transformation.block_size().unwrap_or(1)
    }
}

/// Hash vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestVector {
    /// Hash algorithm.
    pub algorithm: HashAlgorithm,
    /// Message.
    pub text: Vec<u8>,
    /// Published digest.
    pub expected: Vec<u8>,
}

/// HMAC vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacVector {
    /// MAC algorithm.
    pub algorithm: MacAlgorithm,
    /// HMAC key.
    pub key: Vec<u8>,
    /// Message.
    pub text: Vec<u8>,
    /// Published MAC.
    pub expected: Vec<u8>,
}

/// RSA key components.
///
/// The modulus is assumed to be a product of two primes and the exponents
/// inverse modulo the totient. The adapter recovers the primes and rejects
/// components for which that fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    /// Modulus `n`.
    pub modulus: BigUint,
    /// Public exponent `e`.
    pub public_exponent: BigUint,
    /// Private exponent `d`.
    pub private_exponent: BigUint,
}

/// RSA vector. No plaintext is published; only the round trip is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymmetricVector {
    /// Must be `RSA/None/PKCS1Padding`.
    pub transformation: Transformation,
    /// Key components.
    pub key: RsaKeyMaterial,
    /// Ciphertext to decrypt.
    pub ciphertext: Vec<u8>,
}

/// Every vector the checks run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// AES/ECB/NoPadding encryption vector.
    pub symmetric_encrypt: TestVector,
    /// XTEA/CBC/PKCS7Padding decryption vector.
    pub symmetric_decrypt: TestVector,
    /// Hash vectors, in evaluation order.
    pub digests: Vec<DigestVector>,
    /// HMAC vectors, in evaluation order.
    pub macs: Vec<MacVector>,
    /// RSA vector.
    pub asymmetric: AsymmetricVector,
}

impl Catalog {
    /// Decode the built-in vectors.
    pub fn standard() -> Result<Self, CatalogError> {
        let symmetric_encrypt = TestVector::new(
            "aes-ecb",
            AES_ECB_TRANSFORMATION,
            Direction::Encrypt,
            AES_ECB_KEY,
            None,
            AES_ECB_PLAINTEXT,
            Some(AES_ECB_CIPHERTEXT),
        )?;

        let symmetric_decrypt = TestVector::new(
            "xtea-cbc",
            XTEA_CBC_TRANSFORMATION,
            Direction::Decrypt,
            XTEA_CBC_KEY,
            Some(XTEA_CBC_IV),
            XTEA_CBC_CIPHERTEXT,
            Some(XTEA_CBC_PLAINTEXT),
        )?;

        let digests = DIGESTS
            .iter()
            .map(|&(algorithm, text, expected)| -> Result<DigestVector, CatalogError> {
                Ok(DigestVector {
                    algorithm: algorithm
                        .parse()
                        .map_err(|source| CatalogError::InvalidVector { name: "digest", source })?,
                    text: decode("digest", text)?,
                    expected: decode("digest", expected)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let macs = MACS
            .iter()
            .map(|&(algorithm, key, text, expected)| -> Result<MacVector, CatalogError> {
                Ok(MacVector {
                    algorithm: algorithm
                        .parse()
                        .map_err(|source| CatalogError::InvalidVector { name: "mac", source })?,
                    key: decode("mac", key)?,
                    text: decode("mac", text)?,
                    expected: decode("mac", expected)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let asymmetric = AsymmetricVector {
            transformation: RSA_TRANSFORMATION
                .parse()
                .map_err(|source| CatalogError::InvalidVector { name: "rsa", source })?,
            key: RsaKeyMaterial {
                modulus: BigUint::from_bytes_be(&decode("rsa", RSA_MODULUS)?),
                public_exponent: BigUint::from_bytes_be(&decode("rsa", RSA_PUBLIC_EXPONENT)?),
                private_exponent: BigUint::from_bytes_be(&decode("rsa", RSA_PRIVATE_EXPONENT)?),
            },
            ciphertext: decode("rsa", RSA_CIPHERTEXT)?,
        };

        Ok(Self { symmetric_encrypt, symmetric_decrypt, digests, macs, asymmetric })
    }
}
