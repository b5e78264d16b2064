//! # Error Types
//!
//! This module defines the single error type used throughout the library.
//! Every fallible operation returns [`Result<T, CryptoError>`](CryptoError).
//!
//! The taxonomy is deliberately flat: callers match on the variant, never on
//! message text. Only [`CryptoError::BufferTooSmall`] is retryable.

use crate::engine::Algorithm;
use thiserror::Error;

/// The error type for all cipher, KDF, key-wrap and digest operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// An argument was rejected before any work was done.
    ///
    /// Examples: wrong IV length, zero PBKDF2 rounds, a raw key for key wrap
    /// that is not a multiple of 8 bytes.
    #[error("parameter error: {0}")]
    Param(String),

    /// The caller-supplied output buffer is too small.
    ///
    /// Retry with a buffer of at least `needed` bytes. The context state is
    /// untouched when this is returned.
    #[error("output buffer too small: {needed} bytes required")]
    BufferTooSmall {
        /// Minimum output size for the call to succeed.
        needed: usize,
    },

    /// An output allocation could not be satisfied.
    #[error("memory allocation failed")]
    MemoryFailure,

    /// Input was not a multiple of the block size and no padding was requested.
    #[error("input length is not block aligned")]
    Alignment,

    /// Decryption or unwrapping produced data that failed its integrity check.
    ///
    /// This variant carries no detail on purpose: a wrong key and a corrupted
    /// ciphertext look the same from outside.
    #[error("decode error")]
    Decode,

    /// The requested algorithm/mode/option combination is not provided.
    #[error("unimplemented: {0}")]
    Unimplemented(String),

    /// Size arithmetic overflowed `usize`.
    #[error("length overflow")]
    Overflow,

    /// The operating system CSPRNG failed.
    #[error("random number generator failure: {0}")]
    RngFailure(String),

    /// The context is not in a state that allows this call
    /// (for example `update` after `finalize`).
    #[error("call sequence error")]
    CallSequence,

    /// Key length is outside the algorithm's valid key-size set.
    #[error("invalid key size for {algorithm:?}: {len} bytes")]
    KeySize {
        /// Algorithm the key was offered to.
        algorithm: Algorithm,
        /// Offered key length in bytes.
        len: usize,
    },

    /// Key material could not be encoded as required (e.g. non UTF-8 password).
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A provider-level failure with no better mapping.
    #[error("unknown error (code {0})")]
    Unknown(i32),
}

impl CryptoError {
    /// `true` when the same call may be retried unchanged apart from a larger
    /// output buffer.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, CryptoError::BufferTooSmall { .. })
    }
}

impl From<std::collections::TryReserveError> for CryptoError {
    fn from(_: std::collections::TryReserveError) -> Self {
        CryptoError::MemoryFailure
    }
}
