// src/crypto/rng.rs
//! CSPRNG access for keys, IVs and salts.
//!
//! Everything goes through the operating system RNG (`OsRng`). A failure is
//! rare but never ignored: it surfaces as [`CryptoError::RngFailure`].

use rand::{rngs::OsRng, TryRngCore};
use secure_gate::Fixed;
use std::cell::RefCell;

use crate::error::CryptoError;

// Thread-local OsRng wrapped in RefCell so we can mutably borrow it
thread_local! {
    static RNG: RefCell<OsRng> = const { RefCell::new(OsRng) };
}

/// Fill `dest` with cryptographically secure random bytes.
pub fn random_fill(dest: &mut [u8]) -> Result<(), CryptoError> {
    RNG.with(|rng_cell| {
        rng_cell
            .borrow_mut()
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::RngFailure(e.to_string()))
    })
}

/// `n` fresh random bytes.
pub fn random_bytes(n: usize) -> Result<Vec<u8>, CryptoError> {
    let mut bytes = vec![0u8; n];
    random_fill(&mut bytes)?;
    Ok(bytes)
}

/// Extension trait – gives `.random()` to every fixed-size secret buffer
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type
    fn random() -> Result<Self, CryptoError>;
}

impl<const N: usize> SecureRandomExt for Fixed<[u8; N]> {
    #[inline]
    fn random() -> Result<Self, CryptoError> {
        let mut value = Fixed::new([0u8; N]);
        random_fill(value.expose_secret_mut())?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::SpanBuffer;

    #[test]
    fn random_bytes_have_requested_length() {
        assert_eq!(random_bytes(0).unwrap().len(), 0);
        assert_eq!(random_bytes(33).unwrap().len(), 33);
    }

    #[test]
    fn consecutive_draws_differ() {
        let a = SpanBuffer::<32>::random().unwrap();
        let b = SpanBuffer::<32>::random().unwrap();
        assert_ne!(a.expose_secret(), b.expose_secret());
    }
}
