//! Chaining state for every mode: IV/feedback register, keystream block and
//! keystream position.
//!
//! `Ecb`/`Cbc` are driven one whole block at a time through
//! [`ChainState::transform_block`]. The feedback and counter modes are
//! byte-granular: [`ChainState::apply_keystream`] may be called with any
//! length and resumes mid-block on the next call.

use zeroize::Zeroize;

use crate::aliases::CipherBlock;
use crate::consts::MAX_BLOCK_SIZE;
use crate::engine::algorithm::{Mode, Operation};
use crate::engine::provider::{BlockPrimitive, Primitive};
use crate::error::CryptoError;
use crate::utils::xor_in_place;

pub(crate) struct ChainState {
    mode: Mode,
    operation: Operation,
    block_size: usize,
    /// CBC: previous ciphertext. CFB/CFB8: feedback register.
    /// OFB: last output block. CTR: counter.
    register: CipherBlock,
    keystream: CipherBlock,
    /// Next unused keystream byte; `block_size` means "generate a new block".
    position: usize,
}

impl ChainState {
    /// `iv` is either empty (all-zero IV) or exactly `block_size` long.
    pub(crate) fn new(mode: Mode, operation: Operation, block_size: usize, iv: &[u8]) -> Self {
        let mut this = Self {
            mode,
            operation,
            block_size,
            register: CipherBlock::new([0u8; MAX_BLOCK_SIZE]),
            keystream: CipherBlock::new([0u8; MAX_BLOCK_SIZE]),
            position: block_size,
        };
        this.load_iv(iv);
        this
    }

    /// Reload the IV and forget any partially used keystream.
    pub(crate) fn load_iv(&mut self, iv: &[u8]) {
        self.register.expose_secret_mut().zeroize();
        self.keystream.expose_secret_mut().zeroize();
        if self.mode.uses_iv() && !iv.is_empty() {
            self.register.expose_secret_mut()[..self.block_size].copy_from_slice(iv);
        }
        self.position = self.block_size;
    }

    /// Transform one whole block in place (ECB and CBC only).
    pub(crate) fn transform_block(&mut self, cipher: &BlockPrimitive, block: &mut [u8]) {
        let bs = self.block_size;
        match (self.mode, self.operation) {
            (Mode::Cbc, Operation::Encrypt) => {
                xor_in_place(block, &self.register.expose_secret()[..bs]);
                cipher.encrypt_block(block);
                self.register.expose_secret_mut()[..bs].copy_from_slice(block);
            }
            (Mode::Cbc, Operation::Decrypt) => {
                // keystream doubles as scratch for the incoming ciphertext
                self.keystream.expose_secret_mut()[..bs].copy_from_slice(block);
                cipher.decrypt_block(block);
                xor_in_place(block, &self.register.expose_secret()[..bs]);
                let (register, saved) = (&mut self.register, &self.keystream);
                register.expose_secret_mut()[..bs].copy_from_slice(&saved.expose_secret()[..bs]);
            }
            (_, Operation::Encrypt) => cipher.encrypt_block(block),
            (_, Operation::Decrypt) => cipher.decrypt_block(block),
        }
    }

    /// Apply the mode's keystream to `data` in place (CFB, CFB8, OFB, CTR, Stream).
    pub(crate) fn apply_keystream(
        &mut self,
        primitive: &mut Primitive,
        data: &mut [u8],
    ) -> Result<(), CryptoError> {
        let cipher = match (self.mode, primitive) {
            (Mode::Stream, Primitive::Stream(rc4)) => {
                rc4.apply_keystream(data);
                return Ok(());
            }
            (Mode::Cfb | Mode::Cfb8 | Mode::Ofb | Mode::Ctr, Primitive::Block(cipher)) => cipher,
            _ => {
                return Err(CryptoError::Unimplemented(format!(
                    "{:?} mode with this primitive",
                    self.mode
                )))
            }
        };

        let bs = self.block_size;
        for byte in data.iter_mut() {
            match self.mode {
                Mode::Cfb8 => {
                    let ks = self.keystream.expose_secret_mut();
                    ks[..bs].copy_from_slice(&self.register.expose_secret()[..bs]);
                    cipher.encrypt_block(&mut ks[..bs]);
                    let input = *byte;
                    *byte ^= ks[0];
                    let feedback = self.feedback_byte(input, *byte);
                    let register = self.register.expose_secret_mut();
                    register.copy_within(1..bs, 0);
                    register[bs - 1] = feedback;
                }
                Mode::Cfb => {
                    if self.position == bs {
                        let ks = self.keystream.expose_secret_mut();
                        ks[..bs].copy_from_slice(&self.register.expose_secret()[..bs]);
                        cipher.encrypt_block(&mut ks[..bs]);
                        self.position = 0;
                    }
                    let input = *byte;
                    *byte ^= self.keystream.expose_secret()[self.position];
                    let feedback = self.feedback_byte(input, *byte);
                    self.register.expose_secret_mut()[self.position] = feedback;
                    self.position += 1;
                }
                Mode::Ofb => {
                    if self.position == bs {
                        cipher.encrypt_block(&mut self.register.expose_secret_mut()[..bs]);
                        self.position = 0;
                    }
                    *byte ^= self.register.expose_secret()[self.position];
                    self.position += 1;
                }
                Mode::Ctr => {
                    if self.position == bs {
                        let ks = self.keystream.expose_secret_mut();
                        ks[..bs].copy_from_slice(&self.register.expose_secret()[..bs]);
                        cipher.encrypt_block(&mut ks[..bs]);
                        increment_be(&mut self.register.expose_secret_mut()[..bs]);
                        self.position = 0;
                    }
                    *byte ^= self.keystream.expose_secret()[self.position];
                    self.position += 1;
                }
                Mode::Ecb | Mode::Cbc | Mode::Stream => unreachable!("filtered above"),
            }
        }
        Ok(())
    }

    /// The ciphertext byte feeds back, whichever direction we run.
    #[inline(always)]
    fn feedback_byte(&self, input: u8, output: u8) -> u8 {
        match self.operation {
            Operation::Encrypt => output,
            Operation::Decrypt => input,
        }
    }

    pub(crate) fn zeroize(&mut self) {
        self.register.expose_secret_mut().zeroize();
        self.keystream.expose_secret_mut().zeroize();
        self.position = self.block_size;
    }
}

/// Big-endian increment over the whole counter block, wrapping at the top.
#[inline]
fn increment_be(counter: &mut [u8]) {
    for byte in counter.iter_mut().rev() {
        let (next, carry) = byte.overflowing_add(1);
        *byte = next;
        if !carry {
            break;
        }
    }
}
