// src/crypto/mod.rs

//! Primitives around the cipher engine: digests, HMAC, PBKDF2 and the CSPRNG.
//!
//! See the crate root for re-exports. HMAC types are defined in `aliases.rs`.

pub mod digest;
pub mod hmac;
pub mod kdf;
pub mod rng;
