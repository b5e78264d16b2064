//! # Builders
//!
//! Fluent APIs with sensible defaults for the two operations callers
//! configure most.
//!
//! - [`cryptor_builder`] - cipher contexts and one-shot encryption
//! - [`pbkdf2_builder`] - PBKDF2 key derivation

pub mod cryptor_builder;
pub mod pbkdf2_builder;

pub use cryptor_builder::CryptorBuilder;
pub use pbkdf2_builder::Pbkdf2Builder;
