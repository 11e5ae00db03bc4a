//! What a check produces.
//!
//! A check compares computed values against expected ones ([`Comparison`]),
//! runs perturbation probes ([`PerturbationResult`]), and notes data-level
//! mismatches that do not stop it ([`Finding`]). All of it lands in one
//! [`CheckOutcome`] per run.

use std::fmt;

use cipherprobe_crypto::{CryptoError, ct_eq};
use thiserror::Error;

use crate::codec::Hex;

/// Buffer a probe modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    /// Cipher input on encryption.
    Plaintext,
    /// Cipher input on decryption.
    Ciphertext,
    /// Cipher or MAC key.
    Key,
    /// Initialization vector.
    Iv,
    /// Hash or MAC message.
    Text,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plaintext => "plaintext",
            Self::Ciphertext => "ciphertext",
            Self::Key => "key",
            Self::Iv => "IV",
            Self::Text => "text",
        })
    }
}

/// A single modification of one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbation {
    /// XOR one bit. Bit 0 is the least significant.
    BitFlip {
        /// Buffer modified.
        buffer: Buffer,
        /// Byte index.
        byte: usize,
        /// Bit index within the byte, 0 to 7.
        bit: u8,
    },
    /// Keep only a prefix.
    Truncate {
        /// Buffer modified.
        buffer: Buffer,
        /// Length before truncation.
        from: usize,
        /// Length after truncation.
        to: usize,
    },
}

impl Perturbation {
    /// Flip `bit` of `byte` in `buffer`.
    pub fn flip(buffer: Buffer, byte: usize, bit: u8) -> Self {
        Self::BitFlip { buffer, byte, bit: bit % 8 }
    }

    /// Flip the least significant bit of the last byte of a `len`-byte buffer.
    pub fn flip_last(buffer: Buffer, len: usize) -> Self {
        Self::flip(buffer, len.saturating_sub(1), 0)
    }

    /// Truncate a `from`-byte buffer to `to` bytes.
    pub fn truncate(buffer: Buffer, from: usize, to: usize) -> Self {
        Self::Truncate { buffer, from, to: to.min(from) }
    }

    /// The buffer this perturbation touches.
    pub fn buffer(&self) -> Buffer {
        match self {
            Self::BitFlip { buffer, .. } | Self::Truncate { buffer, .. } => *buffer,
        }
    }

    /// Apply to a copy of `data`. Out-of-range positions leave it unchanged.
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        match *self {
            Self::BitFlip { byte, bit, .. } => {
                if let Some(b) = out.get_mut(byte) {
                    *b ^= 1 << bit;
                }
            },
            Self::Truncate { to, .. } => out.truncate(to),
        }
        out
    }
}

impl fmt::Display for Perturbation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BitFlip { buffer, byte, bit } => {
                write!(f, "bit {bit} of {buffer} byte {byte} flipped")
            },
            Self::Truncate { buffer, from, to } => {
                write!(f, "{buffer} truncated from {from} to {to} bytes")
            },
        }
    }
}

/// How far a perturbed output drifted from the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    /// Length of the shared prefix in bytes.
    pub common_prefix: usize,
    /// Byte positions that differ, counting a missing byte as different.
    pub differing_bytes: usize,
    /// Bits that differ, counting a missing byte as eight.
    pub differing_bits: usize,
    /// Indices of blocks containing at least one differing byte.
    pub changed_blocks: Vec<usize>,
    /// Block granularity used for `changed_blocks`.
    pub block_size: usize,
}

impl Divergence {
    /// Compare `perturbed` against `original` at `block_size` granularity.
    ///
    /// A zero block size is treated as 1.
    pub fn measure(original: &[u8], perturbed: &[u8], block_size: usize) -> Self {
        let block_size = block_size.max(1);
        let len = original.len().max(perturbed.len());

        let mut common_prefix = None;
        let mut differing_bytes = 0;
        let mut differing_bits = 0;
        let mut changed_blocks: Vec<usize> = Vec::new();

        for i in 0..len {
            let diff = match (original.get(i), perturbed.get(i)) {
                (Some(a), Some(b)) => (a ^ b).count_ones() as usize,
                _ => 8,
            };
            if diff == 0 {
                continue;
            }

            common_prefix.get_or_insert(i);
            differing_bytes += 1;
            differing_bits += diff;

            let block = i / block_size;
            if changed_blocks.last() != Some(&block) {
                changed_blocks.push(block);
            }
        }

        Self {
            common_prefix: common_prefix.unwrap_or(len),
            differing_bytes,
            differing_bits,
            changed_blocks,
            block_size,
        }
    }

    /// Nothing changed.
    pub fn is_identical(&self) -> bool {
        self.differing_bytes == 0
    }

    /// Every changed block is in `blocks`.
    pub fn confined_to(&self, blocks: &[usize]) -> bool {
        self.changed_blocks.iter().all(|b| blocks.contains(b))
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identical() {
            return f.write_str("identical");
        }
        write!(
            f,
            "{} equal leading bytes, {} bytes / {} bits differ, changed {}-byte blocks {:?}",
            self.common_prefix,
            self.differing_bytes,
            self.differing_bits,
            self.block_size,
            self.changed_blocks
        )
    }
}

/// One probe: a perturbed input and what it did to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerturbationResult {
    /// What was modified.
    pub perturbation: Perturbation,
    /// Output for the unmodified input.
    pub original: Vec<u8>,
    /// Output for the modified input.
    pub perturbed: Vec<u8>,
    /// Relationship between the two outputs.
    pub divergence: Divergence,
}

impl PerturbationResult {
    /// Measure a probe at `block_size` granularity.
    pub fn new(
        perturbation: Perturbation,
        original: Vec<u8>,
        perturbed: Vec<u8>,
        block_size: usize,
    ) -> Self {
        let divergence = Divergence::measure(&original, &perturbed, block_size);
        Self { perturbation, original, perturbed, divergence }
    }
}

/// A probe the transform refused, with the error it gave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// What was modified.
    pub perturbation: Perturbation,
    /// Error returned by the adapter.
    pub error: CryptoError,
}

/// Expected value checked against a computed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// What was compared.
    pub label: String,
    /// Value from the catalog or the unmodified input.
    pub expected: Vec<u8>,
    /// Value the primitive produced.
    pub computed: Vec<u8>,
    /// Constant-time equality of the two.
    pub matched: bool,
}

/// Data-level mismatch recorded without stopping the check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Finding {
    /// Digest differs from the catalog value.
    #[error("digest mismatch for {algorithm}: expected {expected}, computed {computed}")]
    DigestMismatch {
        /// Hash algorithm.
        algorithm: String,
        /// Expected digest (hex).
        expected: String,
        /// Computed digest (hex).
        computed: String,
    },

    /// MAC differs from the catalog value.
    #[error("MAC mismatch for {algorithm}: expected {expected}, computed {computed}")]
    MacMismatch {
        /// MAC algorithm.
        algorithm: String,
        /// Expected MAC (hex).
        expected: String,
        /// Computed MAC (hex).
        computed: String,
    },

    /// Cipher output differs from the catalog value.
    #[error("known answer mismatch for {label}: expected {expected}, computed {computed}")]
    KnownAnswerMismatch {
        /// What was compared.
        label: String,
        /// Expected output (hex).
        expected: String,
        /// Computed output (hex).
        computed: String,
    },
}

/// Everything one check produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Name of the check.
    pub procedure: &'static str,
    /// Expected/computed pairs.
    pub comparisons: Vec<Comparison>,
    /// Probes that produced output.
    pub perturbations: Vec<PerturbationResult>,
    /// Probes the transform rejected as expected.
    pub rejections: Vec<Rejection>,
    /// Non-fatal mismatches.
    pub findings: Vec<Finding>,
    /// Vectors not evaluated because an earlier one failed.
    pub skipped: usize,
}

impl CheckOutcome {
    /// Empty outcome for `procedure`.
    pub fn new(procedure: &'static str) -> Self {
        Self {
            procedure,
            comparisons: Vec::new(),
            perturbations: Vec::new(),
            rejections: Vec::new(),
            findings: Vec::new(),
            skipped: 0,
        }
    }

    /// Record a constant-time comparison and return whether it matched.
    pub fn compare(&mut self, label: impl Into<String>, expected: &[u8], computed: &[u8]) -> bool {
        let matched = ct_eq(expected, computed);
        let label = label.into();

        tracing::info!("{}: expected {}", label, Hex(expected));
        tracing::info!("{}: computed {} (equal: {})", label, Hex(computed), matched);

        self.comparisons.push(Comparison {
            label,
            expected: expected.to_vec(),
            computed: computed.to_vec(),
            matched,
        });
        matched
    }

    /// Record a probe and log its divergence.
    pub fn probe(&mut self, result: PerturbationResult) -> &PerturbationResult {
        tracing::info!("{}", result.perturbation);
        tracing::info!("  output: {}", Hex(&result.perturbed));
        tracing::info!("  versus original: {}", result.divergence);

        let index = self.perturbations.len();
        self.perturbations.push(result);
        &self.perturbations[index]
    }

    /// Record a rejected probe.
    pub fn reject(&mut self, perturbation: Perturbation, error: CryptoError) {
        tracing::info!("{} rejected: {}", perturbation, error);
        self.rejections.push(Rejection { perturbation, error });
    }

    /// Record a non-fatal mismatch.
    pub fn find(&mut self, finding: Finding) {
        tracing::warn!("{}", finding);
        self.findings.push(finding);
    }

    /// Every comparison matched.
    pub fn matched(&self) -> bool {
        self.comparisons.iter().all(|c| c.matched)
    }

    /// Every comparison matched, nothing was found and nothing skipped.
    pub fn passed(&self) -> bool {
        self.matched() && self.findings.is_empty() && self.skipped == 0
    }
}
