//! cipherprobe binary.
//!
//! # Usage
//!
//! ```bash
//! # Run every check
//! cipherprobe
//!
//! # Only the hash and MAC checks, stopping at the first bad digest
//! cipherprobe --only HashCheck --only MacCheck --stop-on-digest-mismatch
//!
//! # List what the adapter supports
//! cipherprobe --list-algorithms
//! ```
//!
//! Exits 1 when any check fails or reports a mismatch.

use std::process::ExitCode;

use cipherprobe_core::{Catalog, DEFAULT_RSA_SEED, HashMismatchPolicy, RunConfig, Runner};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Known-answer and bit-perturbation checks for cryptographic primitives
#[derive(Parser, Debug)]
#[command(name = "cipherprobe")]
#[command(about = "Run known-answer tests and bit-flip probes against crypto primitives")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Run only the named check (repeatable)
    #[arg(long, value_name = "NAME")]
    only: Vec<String>,

    /// Skip remaining digest vectors after the first mismatch
    #[arg(long)]
    stop_on_digest_mismatch: bool,

    /// Seed for RSA padding randomness
    #[arg(long, default_value_t = DEFAULT_RSA_SEED)]
    rsa_seed: u64,

    /// Skip the Blowfish key-strength self-test
    #[arg(long)]
    skip_preflight: bool,

    /// Log supported algorithms and exit
    #[arg(long)]
    list_algorithms: bool,

    /// Exit 0 even when checks fail
    #[arg(long)]
    no_fail_exit: bool,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            hash_policy: if self.stop_on_digest_mismatch {
                HashMismatchPolicy::StopOnFirst
            } else {
                HashMismatchPolicy::EvaluateAll
            },
            rsa_seed: self.rsa_seed,
            preflight: !self.skip_preflight,
            only: self.only.clone(),
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    if args.list_algorithms {
        for (kind, name) in cipherprobe_crypto::capabilities() {
            tracing::info!("{}.{}", kind, name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = args.run_config();
    let catalog = Catalog::standard()?;
    let runner = Runner::standard(&catalog, &config);

    if runner.names().is_empty() {
        tracing::warn!("No checks selected by --only {:?}", config.only);
    }

    let report = runner.run();

    tracing::info!(
        "{} of {} checks passed, {} failed",
        report.passed_count(),
        report.entries.len(),
        report.failed_count()
    );

    if report.all_passed() || args.no_fail_exit {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
