//! Hex codec for vector literals and report output.
//!
//! Literals are written in 8-byte groups (`0001020304050607 08090A0B0C0D0E0F`)
//! and printed the same way, so a logged value can be pasted back into the
//! catalog unchanged.

use std::fmt;

use thiserror::Error;

/// Bytes per printed group.
pub const GROUP_LEN: usize = 8;

/// Hex decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// Odd digit count or a character that is not a hex digit.
    #[error("malformed hex input: {reason}")]
    MalformedHexInput {
        /// What the decoder rejected.
        reason: String,
    },
}

/// Decode hex digit pairs, ignoring any whitespace.
pub fn decode(text: &str) -> Result<Vec<u8>, HexError> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(digits).map_err(|err| HexError::MalformedHexInput { reason: err.to_string() })
}

/// Format bytes as upper-case hex in space-separated 8-byte groups.
pub fn format(bytes: &[u8]) -> String {
    Hex(bytes).to_string()
}

/// Display adapter printing bytes like [`format`].
#[derive(Debug, Clone, Copy)]
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.0.chunks(GROUP_LEN).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&hex::encode_upper(group))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ignores_whitespace() {
        let bytes = decode("0001020304050607 08090A0B\n0C0D0E0F").unwrap();
        assert_eq!(bytes, (0u8..16).collect::<Vec<_>>());
    }

    #[test]
    fn decode_accepts_lower_case() {
        assert_eq!(decode("abba").unwrap(), vec![0xAB, 0xBA]);
    }

    #[test]
    fn odd_digit_count_is_malformed() {
        assert!(matches!(decode("ABC"), Err(HexError::MalformedHexInput { .. })));
    }

    #[test]
    fn non_hex_character_is_malformed() {
        assert!(matches!(decode("ABZZ"), Err(HexError::MalformedHexInput { .. })));
    }

    #[test]
    fn format_groups_eight_bytes() {
        let bytes = decode("719AEAA97C5A673B5C4B61E822F5E5F53280868F660CA2822488E8BDCA6AC6EB").unwrap();
        insta::assert_snapshot!(
            format(&bytes),
            @"719AEAA97C5A673B 5C4B61E822F5E5F5 3280868F660CA282 2488E8BDCA6AC6EB"
        );
    }

    #[test]
    fn format_partial_group() {
        assert_eq!(format(&[0xAB, 0xBA, 0x03, 0x04]), "ABBA0304");
        assert_eq!(format(&[0u8; 9]), "0000000000000000 00");
        assert_eq!(format(&[]), "");
    }
}
