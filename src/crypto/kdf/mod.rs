// src/crypto/kdf/mod.rs

//! Password-based key derivation.

pub mod pbkdf2;
