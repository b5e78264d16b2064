//! # Cryptographic Engine
//!
//! Streaming symmetric encryption/decryption: block buffering, PKCS#7 padding,
//! chaining modes and context lifecycle. Raw block transforms come from the
//! primitive provider.
//!
//! - [`CipherContext`] - incremental `update`/`finalize` API
//! - [`crypt_one_shot`] - whole-buffer convenience built on the same context
//! - [`Algorithm`], [`Mode`], [`Padding`], [`Operation`] - plain tags
//! - [`AlgorithmProfile`] - block size and key sizes per algorithm

pub(crate) mod algorithm;
pub(crate) mod chaining;
pub(crate) mod context;
pub(crate) mod oneshot;
pub(crate) mod padding;
pub(crate) mod provider;

pub use algorithm::{Algorithm, AlgorithmProfile, KeySizes, Mode, Operation, Padding};
pub use context::{CipherContext, CryptOptions, Lifecycle};
pub use oneshot::crypt_one_shot;
