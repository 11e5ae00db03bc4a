//! Fuzz target for the hex codec
//!
//! # Invariants
//!
//! - `decode` returns `Ok` or `MalformedHexInput`, never panics
//! - Anything `decode` accepts formats back to text that decodes to the same
//!   bytes
//! - Formatted text never ends in a space

#![no_main]

use cipherprobe_core::codec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    let Ok(bytes) = codec::decode(text) else {
        return;
    };

    let formatted = codec::format(&bytes);
    assert!(!formatted.ends_with(' '));
    assert_eq!(codec::decode(&formatted).ok(), Some(bytes));
});
