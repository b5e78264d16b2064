//! Primitive provider: keyed single-block transforms and the RC4 keystream.
//!
//! The engine never computes a cipher round itself. It hands whole blocks to a
//! [`BlockPrimitive`] (RustCrypto implementations behind `cipher` 0.4 traits)
//! or bytes to [`Rc4`], and owns everything around that: chaining, buffering,
//! padding and lifecycle.

use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cast5::Cast5;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use des::{Des, TdesEde3};
use rc2::Rc2;
use zeroize::Zeroize;

use crate::engine::algorithm::Algorithm;
use crate::error::CryptoError;

/// A keyed block cipher.
pub(crate) enum BlockPrimitive {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
    Des(Des),
    ThreeDes(TdesEde3),
    Cast(Cast5),
    Rc2(Rc2),
    Blowfish(Blowfish),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            BlockPrimitive::Aes128($c) => $body,
            BlockPrimitive::Aes192($c) => $body,
            BlockPrimitive::Aes256($c) => $body,
            BlockPrimitive::Des($c) => $body,
            BlockPrimitive::ThreeDes($c) => $body,
            BlockPrimitive::Cast($c) => $body,
            BlockPrimitive::Rc2($c) => $body,
            BlockPrimitive::Blowfish($c) => $body,
        }
    };
}

impl BlockPrimitive {
    /// Encrypt one block in place. `block.len()` must equal the block size.
    #[inline(always)]
    pub(crate) fn encrypt_block(&self, block: &mut [u8]) {
        dispatch!(self, c => c.encrypt_block(GenericArray::from_mut_slice(block)))
    }

    /// Decrypt one block in place. `block.len()` must equal the block size.
    #[inline(always)]
    pub(crate) fn decrypt_block(&self, block: &mut [u8]) {
        dispatch!(self, c => c.decrypt_block(GenericArray::from_mut_slice(block)))
    }
}

/// RC4 keystream generator.
///
/// The `rc4` crate fixes the key length at the type level, which does not fit
/// a runtime 1..=512 byte key, so the state machine lives here.
pub(crate) struct Rc4 {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    pub(crate) fn new(key: &[u8]) -> Self {
        let mut state = [0u8; 256];
        for (slot, value) in state.iter_mut().zip(0u8..=255) {
            *slot = value;
        }
        let mut j: u8 = 0;
        for i in 0..256 {
            j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
            state.swap(i, j as usize);
        }
        Self { state, i: 0, j: 0 }
    }

    /// XOR the next `data.len()` keystream bytes into `data`.
    #[inline]
    pub(crate) fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.state[self.i as usize]);
            self.state.swap(self.i as usize, self.j as usize);
            let k = self.state
                [self.state[self.i as usize].wrapping_add(self.state[self.j as usize]) as usize];
            *byte ^= k;
        }
    }
}

impl Drop for Rc4 {
    fn drop(&mut self) {
        self.state.zeroize();
        self.i.zeroize();
        self.j.zeroize();
    }
}

/// Keyed primitive owned by a cipher context.
pub(crate) enum Primitive {
    Block(BlockPrimitive),
    Stream(Rc4),
}

impl Primitive {
    /// Build the key schedule for `algorithm`.
    ///
    /// The caller has already validated `key` against the algorithm profile; a
    /// rejection here still maps to [`CryptoError::KeySize`].
    pub(crate) fn new(algorithm: Algorithm, key: &[u8]) -> Result<Self, CryptoError> {
        let key_size = || CryptoError::KeySize {
            algorithm,
            len: key.len(),
        };
        let block = match algorithm {
            Algorithm::Aes => match key.len() {
                16 => BlockPrimitive::Aes128(
                    <Aes128 as KeyInit>::new_from_slice(key).map_err(|_| key_size())?,
                ),
                24 => BlockPrimitive::Aes192(
                    <Aes192 as KeyInit>::new_from_slice(key).map_err(|_| key_size())?,
                ),
                32 => BlockPrimitive::Aes256(
                    <Aes256 as KeyInit>::new_from_slice(key).map_err(|_| key_size())?,
                ),
                _ => return Err(key_size()),
            },
            Algorithm::Des => {
                BlockPrimitive::Des(<Des as KeyInit>::new_from_slice(key).map_err(|_| key_size())?)
            }
            Algorithm::ThreeDes => BlockPrimitive::ThreeDes(
                <TdesEde3 as KeyInit>::new_from_slice(key).map_err(|_| key_size())?,
            ),
            Algorithm::Cast => {
                BlockPrimitive::Cast(<Cast5 as KeyInit>::new_from_slice(key).map_err(|_| key_size())?)
            }
            Algorithm::Rc2 => {
                if key.is_empty() {
                    return Err(key_size());
                }
                // effective key bits follow the key length, as RFC 2268 test vectors 2 and 3
                BlockPrimitive::Rc2(Rc2::new_with_eff_key_len(key, key.len() * 8))
            }
            Algorithm::Blowfish => BlockPrimitive::Blowfish(
                <Blowfish as KeyInit>::new_from_slice(key).map_err(|_| key_size())?,
            ),
            Algorithm::Rc4 => {
                if key.is_empty() {
                    return Err(key_size());
                }
                return Ok(Primitive::Stream(Rc4::new(key)));
            }
        };
        Ok(Primitive::Block(block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rc4_wikipedia_vector() {
        let mut rc4 = Rc4::new(b"Key");
        let mut data = *b"Plaintext";
        rc4.apply_keystream(&mut data);
        assert_eq!(hex::encode(data), "bbf316e8d940af0ad3");
    }

    #[test]
    fn rc4_keystream_is_continuous_across_calls() {
        let mut whole = *b"pedia";
        Rc4::new(b"Wiki").apply_keystream(&mut whole);
        assert_eq!(hex::encode(whole), "1021bf0420");

        let mut split = *b"pedia";
        let mut rc4 = Rc4::new(b"Wiki");
        let (a, b) = split.split_at_mut(2);
        rc4.apply_keystream(a);
        rc4.apply_keystream(b);
        assert_eq!(split, whole);
    }

    #[test]
    fn aes_single_block_fips197() {
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let Primitive::Block(aes) = Primitive::new(Algorithm::Aes, &key).unwrap() else {
            panic!("AES must be a block primitive");
        };
        let mut block = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        aes.encrypt_block(&mut block);
        assert_eq!(hex::encode(&block), "69c4e0d86a7b0430d8cdb78070b4c55a");
        aes.decrypt_block(&mut block);
        assert_eq!(hex::encode(&block), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn bad_aes_key_length_is_key_size_error() {
        let err = Primitive::new(Algorithm::Aes, &[0u8; 20]).err().unwrap();
        assert_eq!(
            err,
            CryptoError::KeySize {
                algorithm: Algorithm::Aes,
                len: 20
            }
        );
    }
}
