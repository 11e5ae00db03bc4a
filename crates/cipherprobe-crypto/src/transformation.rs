//! Cipher transformation names.
//!
//! A transformation is the `ALGORITHM/MODE/PADDING` triple that selects a
//! cipher configuration, e.g. `AES/ECB/NoPadding` or `RSA/None/PKCS1Padding`.
//! Parsing is case-insensitive and ignores `-` and `_`, so `xTEA`,
//! `PKCS7Padding` and `pkcs-7-padding` all resolve.
//!
//! # Invariants
//!
//! A parsed [`Transformation`] is always coherent: block ciphers pair with a
//! block mode and a block padding, RSA pairs with mode `None` and PKCS#1
//! padding. Anything else is rejected at parse time.

use std::{fmt, str::FromStr};

use crate::CryptoError;

/// Cipher algorithm named by a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherAlgorithm {
    /// AES-128/192/256, chosen by key length.
    Aes,
    /// XTEA with big-endian word order.
    Xtea,
    /// Blowfish with 4 to 56 byte keys.
    Blowfish,
    /// RSA with PKCS#1 v1.5 encryption padding.
    Rsa,
}

impl CipherAlgorithm {
    /// Every supported cipher.
    pub const ALL: [Self; 4] = [Self::Aes, Self::Xtea, Self::Blowfish, Self::Rsa];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aes => "AES",
            Self::Xtea => "XTEA",
            Self::Blowfish => "Blowfish",
            Self::Rsa => "RSA",
        }
    }

    /// Block size in bytes, `None` for RSA.
    pub fn block_size(self) -> Option<usize> {
        match self {
            Self::Aes => Some(16),
            Self::Xtea | Self::Blowfish => Some(8),
            Self::Rsa => None,
        }
    }
}

/// Block chaining mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic codebook: every block is encrypted independently.
    Ecb,
    /// Cipher block chaining with an IV.
    Cbc,
    /// No chaining (RSA).
    None,
}

impl Mode {
    /// Every supported mode.
    pub const ALL: [Self; 3] = [Self::Ecb, Self::Cbc, Self::None];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ecb => "ECB",
            Self::Cbc => "CBC",
            Self::None => "None",
        }
    }

    /// Whether the mode needs an IV.
    pub fn uses_iv(self) -> bool {
        matches!(self, Self::Cbc)
    }
}

/// Padding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    /// Input must already be block aligned.
    NoPadding,
    /// PKCS#7 block padding (`PKCS5Padding` is accepted as an alias).
    Pkcs7,
    /// PKCS#1 v1.5 encryption padding (RSA).
    Pkcs1,
}

impl Padding {
    /// Every supported padding.
    pub const ALL: [Self; 3] = [Self::NoPadding, Self::Pkcs7, Self::Pkcs1];

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoPadding => "NoPadding",
            Self::Pkcs7 => "PKCS7Padding",
            Self::Pkcs1 => "PKCS1Padding",
        }
    }
}

/// A coherent `ALGORITHM/MODE/PADDING` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transformation {
    algorithm: CipherAlgorithm,
    mode: Mode,
    padding: Padding,
}

impl Transformation {
    /// Build a transformation, rejecting incoherent triples.
    pub fn new(
        algorithm: CipherAlgorithm,
        mode: Mode,
        padding: Padding,
    ) -> Result<Self, CryptoError> {
        let coherent = match algorithm {
            CipherAlgorithm::Rsa => mode == Mode::None && padding == Padding::Pkcs1,
            CipherAlgorithm::Aes | CipherAlgorithm::Xtea | CipherAlgorithm::Blowfish => {
                mode != Mode::None && padding != Padding::Pkcs1
            },
        };

        if !coherent {
            return Err(CryptoError::unsupported(format!(
                "{}/{}/{}",
                algorithm.name(),
                mode.name(),
                padding.name()
            )));
        }

        Ok(Self { algorithm, mode, padding })
    }

    /// Cipher algorithm.
    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    /// Chaining mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Padding scheme.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Block size in bytes, `None` for RSA.
    pub fn block_size(&self) -> Option<usize> {
        self.algorithm.block_size()
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.algorithm.name(), self.mode.name(), self.padding.name())
    }
}

impl FromStr for Transformation {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let (Some(algorithm), Some(mode), Some(padding), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CryptoError::unsupported(s));
        };

        let algorithm = match normalize(algorithm).as_str() {
            "AES" => CipherAlgorithm::Aes,
            "XTEA" => CipherAlgorithm::Xtea,
            "BLOWFISH" => CipherAlgorithm::Blowfish,
            "RSA" => CipherAlgorithm::Rsa,
            _ => return Err(CryptoError::unsupported(s)),
        };
        let mode = match normalize(mode).as_str() {
            "ECB" => Mode::Ecb,
            "CBC" => Mode::Cbc,
            "NONE" => Mode::None,
            _ => return Err(CryptoError::unsupported(s)),
        };
        let padding = match normalize(padding).as_str() {
            "NOPADDING" => Padding::NoPadding,
            "PKCS7PADDING" | "PKCS5PADDING" => Padding::Pkcs7,
            "PKCS1PADDING" => Padding::Pkcs1,
            _ => return Err(CryptoError::unsupported(s)),
        };

        Self::new(algorithm, mode, padding)
    }
}

/// Upper-cases a name and drops everything but ASCII letters and digits.
pub(crate) fn normalize(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).map(|c| c.to_ascii_uppercase()).collect()
}
