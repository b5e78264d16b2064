//! # Secure-Gate Type Aliases
//!
//! Type aliases for secret-bearing buffers, built on
//! [`secure-gate`](https://github.com/Slurp9187/secure-gate). Every type here is
//! zeroized on drop and requires an explicit `.expose_secret()` to read.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacMd5`], [`HmacSha1`], [`HmacSha224`], [`HmacSha256`], [`HmacSha384`], [`HmacSha512`]
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - secure stack buffer for any size `N`
//! - [`CipherBlock`] - one block of the largest supported cipher
//!
//! ### Dynamic Secrets
//! - [`KeyBytes`] - variable-length key material (cipher keys, KEKs, derived keys)
//! - [`PasswordString`] - password text fed to PBKDF2

use secure_gate::dynamic_alias;

use crate::consts::MAX_BLOCK_SIZE;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitives
// ─────────────────────────────────────────────────────────────────────────────
use hmac::Hmac;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

pub type HmacMd5 = Hmac<Md5>;
pub type HmacSha1 = Hmac<Sha1>;
pub type HmacSha224 = Hmac<Sha224>;
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha384 = Hmac<Sha384>;
pub type HmacSha512 = Hmac<Sha512>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

/// Chaining registers, carry buffers and keystream blocks. Only the first
/// `block_size` bytes are meaningful for 64-bit block ciphers.
pub type CipherBlock = SpanBuffer<MAX_BLOCK_SIZE>;

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
dynamic_alias!(pub KeyBytes, Vec<u8>);
dynamic_alias!(pub PasswordString, String);
