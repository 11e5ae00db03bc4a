//! Fuzz target for the block cipher adapter
//!
//! # Strategy
//!
//! - Every cipher, mode and padding combination, including incoherent ones
//! - Arbitrary key, IV and input lengths
//!
//! # Invariants
//!
//! - NEVER panic on caller-supplied lengths or padding
//! - Unpadded misaligned input MUST fail with `InvalidInputLength`
//! - Successful encryption decrypts back to the input

#![no_main]

use arbitrary::Arbitrary;
use cipherprobe_crypto::{
    BlockTransform, CipherAlgorithm, CryptoError, Direction, Mode, Padding, Transformation,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    algorithm: u8,
    mode: u8,
    padding: u8,
    key: Vec<u8>,
    iv: Option<Vec<u8>>,
    input: Vec<u8>,
}

fn pick<T: Copy, const N: usize>(all: [T; N], index: u8) -> T {
    all[usize::from(index) % N]
}

fuzz_target!(|input: FuzzInput| {
    let Ok(transformation) = Transformation::new(
        pick(CipherAlgorithm::ALL, input.algorithm),
        pick(Mode::ALL, input.mode),
        pick(Padding::ALL, input.padding),
    ) else {
        return;
    };

    let iv = input.iv.as_deref();
    let Ok(encryptor) = BlockTransform::new(transformation, Direction::Encrypt, &input.key, iv)
    else {
        return;
    };
    let Ok(decryptor) = BlockTransform::new(transformation, Direction::Decrypt, &input.key, iv)
    else {
        return;
    };

    // Garbage as ciphertext: any error is fine, a panic is not
    let _ = decryptor.apply(&input.input);

    match encryptor.apply(&input.input) {
        Ok(ciphertext) => {
            assert_eq!(decryptor.apply(&ciphertext).ok(), Some(input.input));
        },
        Err(CryptoError::InvalidInputLength { len, block_size }) => {
            assert_eq!(transformation.padding(), Padding::NoPadding);
            assert!(len == 0 || len % block_size != 0);
        },
        Err(_) => {},
    }
});
