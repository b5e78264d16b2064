//! src/builders/cryptor_builder.rs
//! Fluent configuration for cipher contexts

use std::fmt;

use crate::aliases::KeyBytes;
use crate::engine::{
    crypt_one_shot, Algorithm, CipherContext, CryptOptions, Mode, Operation, Padding,
};
use crate::error::CryptoError;

/// Builder for [`CipherContext`] and one-shot encryption.
///
/// Defaults: the algorithm's default mode (CBC for block ciphers, Stream for
/// RC4), PKCS#7 padding and an all-zero IV. Only the key is mandatory.
///
/// ```
/// use cryptor_rs::{Algorithm, CryptorBuilder, Mode, Operation};
///
/// let ciphertext = CryptorBuilder::new(Operation::Encrypt, Algorithm::Aes)
///     .mode(Mode::Ctr)
///     .key([0x11u8; 32])
///     .iv([0x22u8; 16])
///     .crypt(b"seven bytes")?;
/// assert_eq!(ciphertext.len(), 11);
/// # Ok::<(), cryptor_rs::CryptoError>(())
/// ```
pub struct CryptorBuilder {
    operation: Operation,
    algorithm: Algorithm,
    options: CryptOptions,
    key: Option<KeyBytes>,
    iv: Option<Vec<u8>>,
}

impl CryptorBuilder {
    #[must_use]
    pub fn new(operation: Operation, algorithm: Algorithm) -> Self {
        Self {
            operation,
            algorithm,
            options: CryptOptions::new().with_padding(Padding::Pkcs7),
            key: None,
            iv: None,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.options = self.options.with_mode(mode);
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.options = self.options.with_padding(padding);
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.key = Some(KeyBytes::new(key.as_ref().to_vec()));
        self
    }

    #[must_use]
    pub fn iv(mut self, iv: impl AsRef<[u8]>) -> Self {
        self.iv = Some(iv.as_ref().to_vec());
        self
    }

    /// Options as they will be handed to the engine.
    #[must_use]
    pub fn options(&self) -> &CryptOptions {
        &self.options
    }

    /// Create the streaming context.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Param`] when no key was set, otherwise whatever
    /// [`CipherContext::create`] returns.
    pub fn build(&self) -> Result<CipherContext, CryptoError> {
        CipherContext::create(
            self.operation,
            self.algorithm,
            &self.options,
            self.require_key()?.expose_secret(),
            self.iv.as_deref(),
        )
    }

    /// Run the whole of `input` through [`crypt_one_shot`].
    pub fn crypt(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        crypt_one_shot(
            self.operation,
            self.algorithm,
            &self.options,
            self.require_key()?.expose_secret(),
            self.iv.as_deref(),
            input,
        )
    }

    fn require_key(&self) -> Result<&KeyBytes, CryptoError> {
        self.key
            .as_ref()
            .ok_or_else(|| CryptoError::Param("no key set on CryptorBuilder".into()))
    }
}

impl fmt::Debug for CryptorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptorBuilder")
            .field("operation", &self.operation)
            .field("algorithm", &self.algorithm)
            .field("options", &self.options)
            .field("has_key", &self.key.is_some())
            .finish_non_exhaustive()
    }
}
