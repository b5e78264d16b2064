//! Stateful incremental cipher context.
//!
//! A [`CipherContext`] is bound to one operation, algorithm, mode, padding,
//! key and IV. Data goes in through any number of [`update`](CipherContext::update)
//! calls followed by one [`finalize`](CipherContext::finalize). Chunk
//! boundaries never matter: partial blocks are carried between calls.
//!
//! # Lifecycle
//!
//! `Created → Active → Finalized → Released`. After `finalize` only
//! [`reset`](CipherContext::reset) (CBC) brings the context back to `Active`.
//! [`release`](CipherContext::release) zeroizes every secret and is also run on
//! drop, so abandoning a context half way is safe.
//!
//! # Thread Safety
//!
//! Every mutating call takes `&mut self`; one context is never shared between
//! threads. Independent contexts have no shared state and can run in parallel.

use std::fmt;

use tracing::{debug, trace};
use zeroize::Zeroize;

use crate::aliases::{CipherBlock, KeyBytes};
use crate::consts::MAX_BLOCK_SIZE;
use crate::engine::algorithm::{Algorithm, Mode, Operation, Padding};
use crate::engine::chaining::ChainState;
use crate::engine::padding::{pad_block, unpadded_len};
use crate::engine::provider::Primitive;
use crate::error::CryptoError;

/// Mode, padding and rarely used knobs passed to [`CipherContext::create`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CryptOptions {
    /// `None` picks the algorithm's default (CBC, or Stream for RC4).
    pub mode: Option<Mode>,
    pub padding: Padding,
    /// Only meaningful for XTS, which no provider implements; must be `None`.
    pub tweak: Option<Vec<u8>>,
    /// `0` selects the algorithm's default round count.
    pub rounds: u32,
}

impl CryptOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_tweak(mut self, tweak: impl Into<Vec<u8>>) -> Self {
        self.tweak = Some(tweak.into());
        self
    }
}

/// Where a context is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Active,
    Finalized,
    Released,
}

pub struct CipherContext {
    operation: Operation,
    algorithm: Algorithm,
    mode: Mode,
    padding: Padding,
    key: KeyBytes,
    primitive: Option<Primitive>,
    chain: ChainState,
    carry: CipherBlock,
    carry_len: usize,
    state: Lifecycle,
}

impl CipherContext {
    /// Validate parameters and build the key schedule.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::KeySize`] if `key` is outside the algorithm's key sizes
    /// - [`CryptoError::Param`] if a used IV has the wrong length, or a tweak is given
    /// - [`CryptoError::Unimplemented`] for an unsupported mode or round count
    pub fn create(
        operation: Operation,
        algorithm: Algorithm,
        options: &CryptOptions,
        key: &[u8],
        iv: Option<&[u8]>,
    ) -> Result<Self, CryptoError> {
        let profile = algorithm.profile();

        if !profile.key_sizes.contains(key.len()) {
            return Err(CryptoError::KeySize {
                algorithm,
                len: key.len(),
            });
        }

        let mode = options.mode.unwrap_or(profile.default_mode);
        if !algorithm.supports(mode) {
            return Err(CryptoError::Unimplemented(format!(
                "{algorithm:?} does not support {mode:?} mode"
            )));
        }

        if options.tweak.is_some() {
            return Err(CryptoError::Param(
                "tweak is only used by XTS mode, which is not provided".into(),
            ));
        }

        if options.rounds != 0 && algorithm.default_rounds(key.len()) != Some(options.rounds) {
            return Err(CryptoError::Unimplemented(format!(
                "{algorithm:?} with {} rounds",
                options.rounds
            )));
        }

        let iv: &[u8] = match iv {
            Some(iv) if mode.uses_iv() && iv.len() != profile.iv_len => {
                return Err(CryptoError::Param(format!(
                    "IV must be {} bytes, got {}",
                    profile.iv_len,
                    iv.len()
                )));
            }
            Some(iv) if mode.uses_iv() => iv,
            _ => &[],
        };

        let primitive = Primitive::new(algorithm, key)?;
        let chain = ChainState::new(mode, operation, profile.block_size, iv);

        debug!(
            ?operation,
            ?algorithm,
            ?mode,
            padding = ?options.padding,
            key_len = key.len(),
            "cipher context created"
        );

        Ok(Self {
            operation,
            algorithm,
            mode,
            padding: options.padding,
            key: KeyBytes::new(key.to_vec()),
            primitive: Some(primitive),
            chain,
            carry: CipherBlock::new([0u8; MAX_BLOCK_SIZE]),
            carry_len: 0,
            state: Lifecycle::Created,
        })
    }

    #[inline]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    #[inline]
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    /// Bytes currently held in the carry buffer.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.carry_len
    }

    /// Output size of the next call, `usize::MAX` if it would overflow.
    ///
    /// With `is_final == false` this is exactly what `update(input)` writes.
    /// With `is_final == true` it bounds `update(input)` followed by
    /// `finalize`, so `output_length(0, true)` is what `finalize` needs.
    pub fn output_length(&self, input_len: usize, is_final: bool) -> usize {
        self.checked_output_length(input_len, is_final)
            .unwrap_or(usize::MAX)
    }

    /// [`output_length`](Self::output_length) reporting overflow as
    /// [`CryptoError::Overflow`].
    pub fn checked_output_length(
        &self,
        input_len: usize,
        is_final: bool,
    ) -> Result<usize, CryptoError> {
        if !self.mode.is_block_aligned() {
            return Ok(input_len);
        }

        let block_size = self.block_size();
        let total = self
            .carry_len
            .checked_add(input_len)
            .ok_or(CryptoError::Overflow)?;
        let aligned = total - total % block_size;

        Ok(match (is_final, self.operation, self.padding) {
            // the last full block may be padding, so decryption holds it back
            (false, Operation::Decrypt, Padding::Pkcs7) if total % block_size == 0 => {
                aligned.saturating_sub(block_size)
            }
            (false, _, _) => aligned,
            (true, Operation::Encrypt, Padding::Pkcs7) => aligned
                .checked_add(block_size)
                .ok_or(CryptoError::Overflow)?,
            (true, Operation::Decrypt, Padding::Pkcs7) => aligned,
            (true, _, Padding::None) => total,
        })
    }

    /// Push `input` through the cipher, writing completed output to `output`.
    ///
    /// Returns the number of bytes written, which is always
    /// `output_length(input.len(), false)`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::BufferTooSmall`] if `output` is shorter than needed;
    ///   the context is unchanged and the call can be retried
    /// - [`CryptoError::CallSequence`] after `finalize` or `release`
    pub fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CryptoError> {
        self.ensure_open()?;
        if input.is_empty() {
            return Ok(0);
        }

        let needed = self.checked_output_length(input.len(), false)?;
        if output.len() < needed {
            return Err(CryptoError::BufferTooSmall { needed });
        }

        self.state = Lifecycle::Active;
        let written = if self.mode.is_block_aligned() {
            self.update_blocks(input, &mut output[..needed])?
        } else {
            let primitive = self.primitive.as_mut().ok_or(CryptoError::CallSequence)?;
            let out = &mut output[..input.len()];
            out.copy_from_slice(input);
            self.chain.apply_keystream(primitive, out)?;
            input.len()
        };

        trace!(
            input_len = input.len(),
            written,
            buffered = self.carry_len,
            "cipher update"
        );
        Ok(written)
    }

    /// Flush the carry buffer, applying or removing padding.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::BufferTooSmall`] (retryable, context unchanged)
    /// - [`CryptoError::Alignment`] if padding is `None` and a partial block remains
    /// - [`CryptoError::Decode`] if PKCS#7 padding is invalid or the
    ///   ciphertext was not block aligned
    /// - [`CryptoError::CallSequence`] after `finalize` or `release`
    ///
    /// Any outcome other than `BufferTooSmall` leaves the context `Finalized`.
    pub fn finalize(&mut self, output: &mut [u8]) -> Result<usize, CryptoError> {
        self.ensure_open()?;

        let needed = self.checked_output_length(0, true)?;
        if output.len() < needed {
            return Err(CryptoError::BufferTooSmall { needed });
        }

        let result = if self.mode.is_block_aligned() {
            self.finalize_blocks(output)
        } else {
            Ok(0)
        };

        self.carry.expose_secret_mut().zeroize();
        self.carry_len = 0;
        self.state = Lifecycle::Finalized;

        match &result {
            Ok(written) => debug!(written, "cipher context finalized"),
            Err(err) => debug!(%err, "cipher context finalized with error"),
        }
        result
    }

    /// [`update`](Self::update) into a freshly allocated vector.
    pub fn update_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = alloc_output(self.checked_output_length(input.len(), false)?)?;
        let written = self.update(input, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// [`finalize`](Self::finalize) into a freshly allocated vector.
    pub fn finalize_to_vec(&mut self) -> Result<Vec<u8>, CryptoError> {
        let mut out = alloc_output(self.checked_output_length(0, true)?)?;
        let written = self.finalize(&mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Re-initialize CBC chaining with the same key and a new IV (zeros when
    /// `None`). Any buffered partial block is discarded.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::Unimplemented`] for any mode other than CBC
    /// - [`CryptoError::Param`] if `iv` has the wrong length
    /// - [`CryptoError::CallSequence`] after `release`
    pub fn reset(&mut self, iv: Option<&[u8]>) -> Result<(), CryptoError> {
        if self.state == Lifecycle::Released {
            return Err(CryptoError::CallSequence);
        }
        if self.mode != Mode::Cbc {
            return Err(CryptoError::Unimplemented(format!(
                "reset in {:?} mode",
                self.mode
            )));
        }

        let iv_len = self.algorithm.profile().iv_len;
        let iv: &[u8] = match iv {
            Some(iv) if iv.len() != iv_len => {
                return Err(CryptoError::Param(format!(
                    "IV must be {iv_len} bytes, got {}",
                    iv.len()
                )));
            }
            Some(iv) => iv,
            None => &[],
        };

        self.primitive = Some(Primitive::new(self.algorithm, self.key.expose_secret())?);
        self.chain.load_iv(iv);
        self.carry.expose_secret_mut().zeroize();
        self.carry_len = 0;
        self.state = Lifecycle::Active;

        debug!(algorithm = ?self.algorithm, "cipher context reset");
        Ok(())
    }

    /// Zeroize key material, chaining state and buffers. Safe to call more than once.
    pub fn release(&mut self) {
        if self.state == Lifecycle::Released {
            return;
        }
        self.key.expose_secret_mut().zeroize();
        self.chain.zeroize();
        self.carry.expose_secret_mut().zeroize();
        self.carry_len = 0;
        self.primitive = None;
        self.state = Lifecycle::Released;
        debug!(algorithm = ?self.algorithm, "cipher context released");
    }

    #[inline]
    fn ensure_open(&self) -> Result<(), CryptoError> {
        match self.state {
            Lifecycle::Created | Lifecycle::Active => Ok(()),
            Lifecycle::Finalized | Lifecycle::Released => Err(CryptoError::CallSequence),
        }
    }

    /// ECB/CBC body of `update`. `output.len()` is exactly the number of bytes
    /// to emit; whatever is left over goes into the carry buffer.
    fn update_blocks(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CryptoError> {
        let block_size = self.block_size();
        let Some(Primitive::Block(cipher)) = self.primitive.as_ref() else {
            return Err(CryptoError::CallSequence);
        };

        let mut scratch = CipherBlock::new([0u8; MAX_BLOCK_SIZE]);
        let mut consumed = 0;
        let mut written = 0;

        while written < output.len() {
            let block = &mut scratch.expose_secret_mut()[..block_size];
            let from_carry = self.carry_len;
            let take = block_size - from_carry;

            block[..from_carry].copy_from_slice(&self.carry.expose_secret()[..from_carry]);
            block[from_carry..].copy_from_slice(&input[consumed..consumed + take]);
            consumed += take;
            self.carry.expose_secret_mut().zeroize();
            self.carry_len = 0;

            self.chain.transform_block(cipher, block);
            output[written..written + block_size].copy_from_slice(block);
            written += block_size;
        }

        let rest = &input[consumed..];
        self.carry.expose_secret_mut()[self.carry_len..self.carry_len + rest.len()]
            .copy_from_slice(rest);
        self.carry_len += rest.len();

        Ok(written)
    }

    fn finalize_blocks(&mut self, output: &mut [u8]) -> Result<usize, CryptoError> {
        let block_size = self.block_size();
        let Some(Primitive::Block(cipher)) = self.primitive.as_ref() else {
            return Err(CryptoError::CallSequence);
        };

        match (self.operation, self.padding) {
            (_, Padding::None) => {
                if self.carry_len != 0 {
                    return Err(CryptoError::Alignment);
                }
                Ok(0)
            }
            (Operation::Encrypt, Padding::Pkcs7) => {
                let mut scratch = CipherBlock::new(*self.carry.expose_secret());
                let block = &mut scratch.expose_secret_mut()[..block_size];
                pad_block(block, self.carry_len);
                self.chain.transform_block(cipher, block);
                output[..block_size].copy_from_slice(block);
                Ok(block_size)
            }
            (Operation::Decrypt, Padding::Pkcs7) => {
                if self.carry_len != block_size {
                    return Err(CryptoError::Decode);
                }
                let mut scratch = CipherBlock::new(*self.carry.expose_secret());
                let block = &mut scratch.expose_secret_mut()[..block_size];
                self.chain.transform_block(cipher, block);
                let len = unpadded_len(block)?;
                output[..len].copy_from_slice(&block[..len]);
                Ok(len)
            }
        }
    }
}

impl Drop for CipherContext {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherContext")
            .field("operation", &self.operation)
            .field("algorithm", &self.algorithm)
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("buffered", &self.carry_len)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Zero-filled output vector, reporting allocation failure instead of aborting.
pub(crate) fn alloc_output(len: usize) -> Result<Vec<u8>, CryptoError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    out.resize(len, 0);
    Ok(out)
}
