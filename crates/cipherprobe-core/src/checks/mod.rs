//! Verification procedures.
//!
//! Each check borrows its vectors from the [`Catalog`](crate::Catalog),
//! builds fresh transforms from the adapter, and returns a [`CheckOutcome`]
//! or the [`CheckError`] that stopped it. Checks share nothing mutable and
//! can run in any order; the runner fixes the order for readable output.
//!
//! Every bit flip uses bit 0 (the least significant bit) of the chosen byte.

mod asymmetric;
mod hash;
mod mac;
mod symmetric_decrypt;
mod symmetric_encrypt;

pub use asymmetric::AsymmetricCheck;
pub use hash::HashCheck;
pub use mac::MacCheck;
pub use symmetric_decrypt::SymmetricDecryptCheck;
pub use symmetric_encrypt::SymmetricEncryptCheck;

use crate::{CheckError, CheckOutcome, codec::Hex};

/// A verification procedure.
pub trait Check {
    /// Name used in logs, reports and `--only` filters.
    fn name(&self) -> &'static str;

    /// Run the procedure once.
    fn execute(&self) -> Result<CheckOutcome, CheckError>;
}

/// Fail with [`CheckError::RoundTripFailure`] unless `actual == expected`.
fn ensure_round_trip(stage: &str, expected: &[u8], actual: &[u8]) -> Result<(), CheckError> {
    if expected == actual {
        return Ok(());
    }
    Err(CheckError::RoundTripFailure {
        stage: stage.to_string(),
        expected: Hex(expected).to_string(),
        actual: Hex(actual).to_string(),
    })
}
