//! Message digests and HMAC.
//!
//! Algorithms are named the way the vector catalog names them (`Tiger`,
//! `RipeMD320`, `HMac-RipeMD160`, `HmacSHA384`). Names are matched after
//! dropping punctuation and case.

use std::{fmt, str::FromStr};

use digest::{Digest, KeyInit, Mac};
use hmac::Hmac;
use ripemd::{Ripemd128, Ripemd160, Ripemd256, Ripemd320};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use tiger::{Tiger, Tiger2};

use crate::{CryptoError, transformation::normalize};

/// Unkeyed hash function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// Tiger (192-bit, 0x01 padding).
    Tiger,
    /// Tiger2 (192-bit, 0x80 padding).
    Tiger2,
    /// RIPEMD-128.
    Ripemd128,
    /// RIPEMD-160.
    Ripemd160,
    /// RIPEMD-256.
    Ripemd256,
    /// RIPEMD-320.
    Ripemd320,
    /// SHA-1.
    Sha1,
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Every supported hash.
    pub const ALL: [Self; 11] = [
        Self::Tiger,
        Self::Tiger2,
        Self::Ripemd128,
        Self::Ripemd160,
        Self::Ripemd256,
        Self::Ripemd320,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tiger => "Tiger",
            Self::Tiger2 => "Tiger2",
            Self::Ripemd128 => "RipeMD128",
            Self::Ripemd160 => "RipeMD160",
            Self::Ripemd256 => "RipeMD256",
            Self::Ripemd320 => "RipeMD320",
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Self::Ripemd128 => 16,
            Self::Ripemd160 | Self::Sha1 => 20,
            Self::Tiger | Self::Tiger2 => 24,
            Self::Sha224 => 28,
            Self::Ripemd256 | Self::Sha256 => 32,
            Self::Ripemd320 => 40,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|alg| normalize(alg.name()) == normalized)
            .ok_or_else(|| CryptoError::unsupported(s))
    }
}

/// HMAC over a hash function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacAlgorithm {
    /// HMAC-RIPEMD-160.
    HmacRipemd160,
    /// HMAC-SHA-1.
    HmacSha1,
    /// HMAC-SHA-256.
    HmacSha256,
    /// HMAC-SHA-384.
    HmacSha384,
    /// HMAC-SHA-512.
    HmacSha512,
}

impl MacAlgorithm {
    /// Every supported MAC.
    pub const ALL: [Self; 5] =
        [Self::HmacRipemd160, Self::HmacSha1, Self::HmacSha256, Self::HmacSha384, Self::HmacSha512];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::HmacRipemd160 => "HMac-RipeMD160",
            Self::HmacSha1 => "HmacSHA1",
            Self::HmacSha256 => "HmacSHA256",
            Self::HmacSha384 => "HmacSHA384",
            Self::HmacSha512 => "HmacSHA512",
        }
    }

    /// The underlying hash.
    pub fn hash(self) -> HashAlgorithm {
        match self {
            Self::HmacRipemd160 => HashAlgorithm::Ripemd160,
            Self::HmacSha1 => HashAlgorithm::Sha1,
            Self::HmacSha256 => HashAlgorithm::Sha256,
            Self::HmacSha384 => HashAlgorithm::Sha384,
            Self::HmacSha512 => HashAlgorithm::Sha512,
        }
    }

    /// Tag length in bytes.
    pub fn output_len(self) -> usize {
        self.hash().output_len()
    }
}

impl fmt::Display for MacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MacAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|alg| normalize(alg.name()) == normalized)
            .ok_or_else(|| CryptoError::unsupported(s))
    }
}

fn hash_with<D: Digest>(input: &[u8]) -> Vec<u8> {
    D::digest(input).to_vec()
}

fn mac_with<M: Mac + KeyInit>(key: &[u8], input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| CryptoError::InvalidKeyLength { algorithm: "HMAC", len: key.len() })?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Hash `input`.
pub fn digest(algorithm: HashAlgorithm, input: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Tiger => hash_with::<Tiger>(input),
        HashAlgorithm::Tiger2 => hash_with::<Tiger2>(input),
        HashAlgorithm::Ripemd128 => hash_with::<Ripemd128>(input),
        HashAlgorithm::Ripemd160 => hash_with::<Ripemd160>(input),
        HashAlgorithm::Ripemd256 => hash_with::<Ripemd256>(input),
        HashAlgorithm::Ripemd320 => hash_with::<Ripemd320>(input),
        HashAlgorithm::Sha1 => hash_with::<Sha1>(input),
        HashAlgorithm::Sha224 => hash_with::<Sha224>(input),
        HashAlgorithm::Sha256 => hash_with::<Sha256>(input),
        HashAlgorithm::Sha384 => hash_with::<Sha384>(input),
        HashAlgorithm::Sha512 => hash_with::<Sha512>(input),
    }
}

/// Hash `input` with an algorithm given by name.
pub fn digest_named(name: &str, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    Ok(digest(name.parse()?, input))
}

/// Compute the HMAC of `input` under `key`.
///
/// HMAC accepts keys of any length, so this only fails if the underlying
/// implementation refuses the key.
pub fn mac(algorithm: MacAlgorithm, key: &[u8], input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    match algorithm {
        MacAlgorithm::HmacRipemd160 => mac_with::<Hmac<Ripemd160>>(key, input),
        MacAlgorithm::HmacSha1 => mac_with::<Hmac<Sha1>>(key, input),
        MacAlgorithm::HmacSha256 => mac_with::<Hmac<Sha256>>(key, input),
        MacAlgorithm::HmacSha384 => mac_with::<Hmac<Sha384>>(key, input),
        MacAlgorithm::HmacSha512 => mac_with::<Hmac<Sha512>>(key, input),
    }
}

/// Compute an HMAC with an algorithm given by name.
pub fn mac_named(name: &str, key: &[u8], input: &[u8]) -> Result<Vec<u8>, CryptoError> {
    mac(name.parse()?, key, input)
}

/// Compare two byte strings in constant time.
///
/// Runs in time independent of where the first difference is. Inputs of
/// different length compare unequal.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
