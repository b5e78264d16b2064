//! src/builders/pbkdf2_builder.rs
//! PBKDF2 builder with strong defaults

use crate::aliases::{KeyBytes, PasswordString, SpanBuffer};
use crate::consts::{DEFAULT_PBKDF2_LENGTH, DEFAULT_PBKDF2_ROUNDS, DEFAULT_SALT_SIZE};
use crate::crypto::kdf::pbkdf2::{derive_key, Prf};
use crate::crypto::rng::SecureRandomExt;
use crate::error::CryptoError;

type Salt = SpanBuffer<DEFAULT_SALT_SIZE>;

/// PBKDF2 key derivation builder
///
/// Defaults: HMAC-SHA256, a fresh 16-byte random salt, [`DEFAULT_PBKDF2_ROUNDS`]
/// rounds and a [`DEFAULT_PBKDF2_LENGTH`]-byte key.
///
/// # Thread Safety
///
/// This type is **thread-safe** (`Send + Sync`). All operations are pure.
#[derive(Debug, Clone)]
pub struct Pbkdf2Builder {
    prf: Prf,
    rounds: u32,
    output_length: usize,
    salt: Salt,
}

impl Pbkdf2Builder {
    /// Create a builder with a freshly drawn salt.
    ///
    /// # Errors
    ///
    /// [`CryptoError::RngFailure`] if the system RNG cannot produce the salt.
    pub fn new() -> Result<Self, CryptoError> {
        Ok(Self {
            prf: Prf::HmacSha256,
            rounds: DEFAULT_PBKDF2_ROUNDS,
            output_length: DEFAULT_PBKDF2_LENGTH,
            salt: Salt::random()?,
        })
    }

    #[must_use]
    pub fn with_prf(mut self, prf: Prf) -> Self {
        self.prf = prf;
        self
    }

    /// Set custom round count (minimum 1)
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.max(1);
        self
    }

    /// Set derived key length (minimum 1)
    #[must_use]
    pub fn with_output_length(mut self, output_length: usize) -> Self {
        self.output_length = output_length.max(1);
        self
    }

    /// Replace the random salt, e.g. with one read back from storage.
    #[must_use]
    pub fn with_salt(mut self, salt: [u8; DEFAULT_SALT_SIZE]) -> Self {
        self.salt = Salt::new(salt);
        self
    }

    /// Current salt (store it next to whatever the key protects)
    #[must_use]
    pub fn salt(&self) -> &[u8; DEFAULT_SALT_SIZE] {
        self.salt.expose_secret()
    }

    #[must_use]
    pub const fn prf(&self) -> Prf {
        self.prf
    }

    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    #[must_use]
    pub const fn output_length(&self) -> usize {
        self.output_length
    }

    /// Derive the key.
    pub fn derive(&self, password: &PasswordString) -> Result<KeyBytes, CryptoError> {
        derive_key(
            password,
            Some(self.salt.expose_secret()),
            self.prf,
            self.rounds,
            self.output_length,
        )
    }
}
