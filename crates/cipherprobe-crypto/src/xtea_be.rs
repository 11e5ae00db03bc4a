//! XTEA with big-endian word order.
//!
//! The `xtea` crate loads key and block words little-endian. The reference
//! vectors this harness checks were produced by an implementation that loads
//! them big-endian, so [`XteaBigEndian`] byte-swaps each 32-bit word on the
//! way in and out of the inner cipher. The round function is untouched.

use cipher::{
    Block, BlockCipherDecBackend, BlockCipherDecClosure, BlockCipherDecrypt,
    BlockCipherEncBackend, BlockCipherEncClosure, BlockCipherEncrypt, BlockSizeUser, InOut,
    InvalidLength, Key, KeyInit, KeySizeUser, ParBlocksSizeUser,
    consts::{U1, U8, U16},
};
use xtea::Xtea;

/// XTEA block cipher reading words most significant byte first.
pub struct XteaBigEndian {
    inner: Xtea,
}

fn swap_words(bytes: &mut [u8]) {
    for word in bytes.chunks_exact_mut(4) {
        word.reverse();
    }
}

impl KeySizeUser for XteaBigEndian {
    type KeySize = U16;
}

impl KeyInit for XteaBigEndian {
    fn new(key: &Key<Self>) -> Self {
        let mut swapped = key.clone();
        swap_words(&mut swapped);
        Self { inner: <Xtea as KeyInit>::new(&swapped) }
    }

    fn new_from_slice(key: &[u8]) -> Result<Self, InvalidLength> {
        let key = <&Key<Self>>::try_from(key).map_err(|_| InvalidLength)?;
        Ok(<Self as KeyInit>::new(key))
    }
}

impl BlockSizeUser for XteaBigEndian {
    type BlockSize = U8;
}

impl ParBlocksSizeUser for XteaBigEndian {
    type ParBlocksSize = U1;
}

impl BlockCipherEncrypt for XteaBigEndian {
    fn encrypt_with_backend(&self, f: impl BlockCipherEncClosure<BlockSize = Self::BlockSize>) {
        f.call(self);
    }
}

impl BlockCipherEncBackend for XteaBigEndian {
    fn encrypt_block(&self, mut block: InOut<'_, '_, Block<Self>>) {
        let mut buf = block.get_in().clone();
        swap_words(&mut buf);
        BlockCipherEncrypt::encrypt_block(&self.inner, &mut buf);
        swap_words(&mut buf);
        *block.get_out() = buf;
    }
}

impl BlockCipherDecrypt for XteaBigEndian {
    fn decrypt_with_backend(&self, f: impl BlockCipherDecClosure<BlockSize = Self::BlockSize>) {
        f.call(self);
    }
}

impl BlockCipherDecBackend for XteaBigEndian {
    fn decrypt_block(&self, mut block: InOut<'_, '_, Block<Self>>) {
        let mut buf = block.get_in().clone();
        swap_words(&mut buf);
        BlockCipherDecrypt::decrypt_block(&self.inner, &mut buf);
        swap_words(&mut buf);
        *block.get_out() = buf;
    }
}
