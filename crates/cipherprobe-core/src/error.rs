//! Check and catalog error types.

use cipherprobe_crypto::CryptoError;
use thiserror::Error;

use crate::codec::HexError;

/// Errors that end a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The adapter refused the configuration or an input the check relied on.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Inverse operation did not reproduce the original.
    #[error("round trip failed for {stage}: expected {expected}, got {actual}")]
    RoundTripFailure {
        /// Which round trip.
        stage: String,
        /// Original value (hex).
        expected: String,
        /// Value after the round trip (hex).
        actual: String,
    },

    /// A CBC IV perturbation changed plaintext beyond the first block.
    #[error("avalanche invariant violated by {perturbation}: changed blocks {blocks:?}, only block 0 may change")]
    AvalancheInvariantViolation {
        /// The IV perturbation applied.
        perturbation: String,
        /// Blocks that differed from the correct plaintext.
        blocks: Vec<usize>,
    },

    /// A probe that must be rejected was accepted.
    #[error("{perturbation} was accepted, expected {expected}")]
    MissingExpectedError {
        /// The probe applied.
        perturbation: String,
        /// Error kind that should have been returned.
        expected: &'static str,
    },
}

impl CheckError {
    /// Taxonomy name of the error, as used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Crypto(err) => match err {
                CryptoError::UnsupportedConfiguration { .. } => "UnsupportedConfiguration",
                CryptoError::InvalidInputLength { .. } => "InvalidInputLength",
                CryptoError::InvalidKeyLength { .. } => "InvalidKeyLength",
                CryptoError::InvalidIvLength { .. } => "InvalidIvLength",
                CryptoError::BadPadding { .. } => "BadPadding",
                CryptoError::Rsa { .. } => "Rsa",
            },
            Self::RoundTripFailure { .. } => "RoundTripFailure",
            Self::AvalancheInvariantViolation { .. } => "AvalancheInvariantViolation",
            Self::MissingExpectedError { .. } => "MissingExpectedError",
        }
    }

    /// Returns true if the primitive itself misbehaved.
    ///
    /// Violations mean the library produced wrong output. Everything else
    /// means the check could not run as configured.
    pub fn is_violation(&self) -> bool {
        match self {
            Self::RoundTripFailure { .. }
            | Self::AvalancheInvariantViolation { .. }
            | Self::MissingExpectedError { .. } => true,

            Self::Crypto(_) => false,
        }
    }
}

/// Errors building the vector catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A literal is not valid hex.
    #[error("vector {name}: {source}")]
    MalformedHexInput {
        /// Vector containing the literal.
        name: &'static str,
        /// Decoder error.
        source: HexError,
    },

    /// A vector names something the adapter cannot build.
    #[error("vector {name}: {source}")]
    InvalidVector {
        /// Vector name.
        name: &'static str,
        /// Adapter error.
        source: CryptoError,
    },

    /// An input that must be block aligned is not.
    #[error("vector {name}: {len}-byte input is not a multiple of {block_size}")]
    Misaligned {
        /// Vector name.
        name: &'static str,
        /// Input length.
        len: usize,
        /// Cipher block size.
        block_size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_violation() {
        let err = CheckError::RoundTripFailure {
            stage: "decrypt(encrypt(input))".to_string(),
            expected: "AA".to_string(),
            actual: "AB".to_string(),
        };
        assert!(err.is_violation());
        assert_eq!(err.kind(), "RoundTripFailure");
    }

    #[test]
    fn adapter_error_is_not_violation() {
        let err = CheckError::from(CryptoError::InvalidInputLength { len: 15, block_size: 16 });
        assert!(!err.is_violation());
        assert_eq!(err.kind(), "InvalidInputLength");
        assert_eq!(err.to_string(), "invalid input length: 15 bytes for 16-byte blocks");
    }

    #[test]
    fn error_display() {
        let err = CheckError::AvalancheInvariantViolation {
            perturbation: "bit 0 of IV byte 7 flipped".to_string(),
            blocks: vec![0, 2],
        };
        assert_eq!(
            err.to_string(),
            "avalanche invariant violated by bit 0 of IV byte 7 flipped: changed blocks [0, 2], only block 0 may change"
        );
    }

    #[test]
    fn catalog_error_names_vector() {
        let err = CatalogError::Misaligned { name: "aes-ecb", len: 31, block_size: 16 };
        assert_eq!(err.to_string(), "vector aes-ecb: 31-byte input is not a multiple of 16");
    }
}
