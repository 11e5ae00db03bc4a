//! Adapter error types.

use thiserror::Error;

/// Errors from the primitive adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Unknown algorithm, mode or padding, or a combination that makes no
    /// sense (RSA with a block mode, XTEA with PKCS#1 padding).
    #[error("unsupported configuration: {what}")]
    UnsupportedConfiguration {
        /// The rejected name or triple.
        what: String,
    },

    /// Input length does not fit the block structure of the transform.
    #[error("invalid input length: {len} bytes for {block_size}-byte blocks")]
    InvalidInputLength {
        /// Length of the rejected input.
        len: usize,
        /// Block size of the cipher.
        block_size: usize,
    },

    /// Key length not accepted by the algorithm.
    #[error("invalid key length: {len} bytes for {algorithm}")]
    InvalidKeyLength {
        /// Algorithm the key was offered to.
        algorithm: &'static str,
        /// Length of the rejected key.
        len: usize,
    },

    /// IV missing, unexpected or of the wrong size.
    #[error("invalid IV for {mode}: {reason}")]
    InvalidIvLength {
        /// Mode the IV was offered to.
        mode: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Padding bytes of a decrypted message are malformed.
    #[error("bad padding after {padding} decryption")]
    BadPadding {
        /// Padding scheme that failed to unpad.
        padding: &'static str,
    },

    /// RSA key construction, encryption or decryption failed.
    #[error("RSA error: {reason}")]
    Rsa {
        /// Description of the RSA failure.
        reason: String,
    },
}

impl CryptoError {
    /// Returns true if the error comes from the configuration rather than
    /// from the data fed through the transform.
    ///
    /// Configuration errors mean the adapter was asked for something it
    /// cannot build. Data errors mean the transform exists but rejected an
    /// input, which probes sometimes provoke on purpose.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::UnsupportedConfiguration { .. }
            | Self::InvalidKeyLength { .. }
            | Self::InvalidIvLength { .. } => true,

            Self::InvalidInputLength { .. } | Self::BadPadding { .. } | Self::Rsa { .. } => false,
        }
    }

    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration { what: what.into() }
    }

    pub(crate) fn rsa(err: impl std::fmt::Display) -> Self {
        Self::Rsa { reason: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_is_configuration() {
        let err = CryptoError::unsupported("DES/ECB/NoPadding");
        assert!(err.is_configuration());
    }

    #[test]
    fn input_length_is_data_error() {
        let err = CryptoError::InvalidInputLength { len: 15, block_size: 16 };
        assert!(!err.is_configuration());
    }

    #[test]
    fn error_display() {
        let err = CryptoError::InvalidInputLength { len: 15, block_size: 16 };
        assert_eq!(err.to_string(), "invalid input length: 15 bytes for 16-byte blocks");

        let err = CryptoError::InvalidKeyLength { algorithm: "XTEA", len: 7 };
        assert_eq!(err.to_string(), "invalid key length: 7 bytes for XTEA");
    }
}
