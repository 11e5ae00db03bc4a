//! cipherprobe primitive adapter
//!
//! Algorithm-agnostic encrypt, decrypt, digest and MAC operations over the
//! RustCrypto crates, selected by name the way a JCE-style provider would:
//! `AES/ECB/NoPadding`, `RipeMD320`, `HmacSHA384`.
//!
//! # Design
//!
//! The adapter does not implement any primitive. It parses names into typed
//! configurations, validates keys, IVs and input lengths, and dispatches to
//! the library implementation. Every failure is a [`CryptoError`]; nothing in
//! this crate panics on caller-supplied data.
//!
//! Randomness (RSA padding) is supplied by the caller so that runs can be
//! reproduced with a seeded RNG.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod asymmetric;
mod block;
mod error;
mod hash;
mod transformation;
mod xtea_be;

use std::fmt;

pub use asymmetric::{RsaCipher, RsaKeyPair};
pub use block::{BlockTransform, Direction, decrypt, encrypt};
pub use error::CryptoError;
pub use hash::{HashAlgorithm, MacAlgorithm, ct_eq, digest, digest_named, mac, mac_named};
pub use rsa::BigUint;
pub use transformation::{CipherAlgorithm, Mode, Padding, Transformation};
pub use xtea_be::XteaBigEndian;

/// Kind of algorithm reported by [`capabilities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlgorithmKind {
    /// Symmetric block cipher.
    BlockCipher,
    /// Asymmetric cipher.
    AsymmetricCipher,
    /// Block chaining mode.
    Mode,
    /// Padding scheme.
    Padding,
    /// Message digest.
    MessageDigest,
    /// Keyed MAC.
    Mac,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BlockCipher => "Cipher",
            Self::AsymmetricCipher => "AsymmetricCipher",
            Self::Mode => "Mode",
            Self::Padding => "Padding",
            Self::MessageDigest => "MessageDigest",
            Self::Mac => "Mac",
        })
    }
}

/// List every algorithm, mode and padding the adapter can build.
pub fn capabilities() -> Vec<(AlgorithmKind, &'static str)> {
    let ciphers = CipherAlgorithm::ALL.into_iter().map(|alg| {
        let kind = if alg.block_size().is_some() {
            AlgorithmKind::BlockCipher
        } else {
            AlgorithmKind::AsymmetricCipher
        };
        (kind, alg.name())
    });

    ciphers
        .chain(Mode::ALL.into_iter().map(|m| (AlgorithmKind::Mode, m.name())))
        .chain(Padding::ALL.into_iter().map(|p| (AlgorithmKind::Padding, p.name())))
        .chain(HashAlgorithm::ALL.into_iter().map(|h| (AlgorithmKind::MessageDigest, h.name())))
        .chain(MacAlgorithm::ALL.into_iter().map(|m| (AlgorithmKind::Mac, m.name())))
        .collect()
}
