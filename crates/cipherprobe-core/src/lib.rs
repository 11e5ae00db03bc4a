//! cipherprobe checks
//!
//! Known-answer and single-bit perturbation checks run against the primitive
//! adapter in `cipherprobe-crypto`.
//!
//! # Architecture
//!
//! ```text
//! Catalog ──borrowed by──> Check (x5) ──> CheckOutcome | CheckError
//!                             │
//!                           Runner ──> RunReport
//! ```
//!
//! - [`Catalog`]: fixed vectors, decoded once and read-only afterwards
//! - [`Check`]: one verification procedure; five implementors in [`checks`]
//! - [`Runner`]: runs checks in order, isolating each failure
//! - [`codec`]: hex decoding and grouped formatting for logs
//!
//! Each probe records how far the perturbed output diverged from the
//! original so tests can assert on the propagation behavior of a mode, not
//! only on log text.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
pub mod checks;
pub mod codec;
mod config;
mod error;
pub mod model;
pub mod preflight;
mod runner;

pub use catalog::{AsymmetricVector, Catalog, DigestVector, MacVector, RsaKeyMaterial, TestVector};
pub use checks::Check;
pub use config::{DEFAULT_RSA_SEED, HashMismatchPolicy, RunConfig};
pub use error::{CatalogError, CheckError};
pub use model::{CheckOutcome, Finding, Perturbation, PerturbationResult};
pub use runner::{RunEntry, RunReport, Runner};
