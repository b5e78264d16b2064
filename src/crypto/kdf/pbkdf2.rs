//! src/crypto/kdf/pbkdf2.rs
//! PBKDF2 (RFC 8018 §5.2) over HMAC-SHA1/SHA-2 with Unicode-normalized passwords

use std::time::{Duration, Instant};

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use tracing::{debug, instrument};
use unicode_normalization::UnicodeNormalization;

use crate::aliases::{KeyBytes, PasswordString};
use crate::consts::{PBKDF2_CALIBRATION_ROUNDS, PBKDF2_MIN_ROUNDS};
use crate::crypto::digest::DigestAlgorithm;
use crate::error::CryptoError;

/// Pseudo-random function driving PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prf {
    HmacSha1,
    HmacSha224,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl Prf {
    /// Underlying digest.
    #[inline]
    pub const fn digest(self) -> DigestAlgorithm {
        match self {
            Prf::HmacSha1 => DigestAlgorithm::Sha1,
            Prf::HmacSha224 => DigestAlgorithm::Sha224,
            Prf::HmacSha256 => DigestAlgorithm::Sha256,
            Prf::HmacSha384 => DigestAlgorithm::Sha384,
            Prf::HmacSha512 => DigestAlgorithm::Sha512,
        }
    }
}

/// Derive `output_length` bytes from `password` and `salt`.
///
/// The password is brought to Unicode canonical decomposition (NFD) before it
/// is UTF-8 encoded, so "é" typed as one code point or as "e" + combining
/// accent derives the same key. A missing salt is the empty salt.
///
/// # Errors
///
/// - [`CryptoError::Param`] if `rounds == 0` or `output_length == 0`
#[instrument(
    skip_all,
    fields(prf = ?prf, rounds = rounds, output_length = output_length),
    err
)]
pub fn derive_key(
    password: &PasswordString,
    salt: Option<&[u8]>,
    prf: Prf,
    rounds: u32,
    output_length: usize,
) -> Result<KeyBytes, CryptoError> {
    if rounds < PBKDF2_MIN_ROUNDS {
        return Err(CryptoError::Param("PBKDF2 rounds must be ≥1".into()));
    }
    if output_length == 0 {
        return Err(CryptoError::Param("PBKDF2 output length must be ≥1".into()));
    }

    let normalized = PasswordString::new(password.expose_secret().nfd().collect::<String>());
    let salt = salt.unwrap_or_default();
    let mut out_key = KeyBytes::new(vec![0u8; output_length]);

    pbkdf2_into(
        prf,
        normalized.expose_secret().as_bytes(),
        salt,
        rounds,
        out_key.expose_secret_mut(),
    )?;

    debug!(salt_len = salt.len(), "PBKDF2 key derived");
    Ok(out_key)
}

/// [`derive_key`] for passwords that arrive as raw bytes.
///
/// # Errors
///
/// - [`CryptoError::InvalidKey`] if `password` is not valid UTF-8
/// - everything [`derive_key`] returns
pub fn derive_key_from_bytes(
    password: &[u8],
    salt: Option<&[u8]>,
    prf: Prf,
    rounds: u32,
    output_length: usize,
) -> Result<KeyBytes, CryptoError> {
    let text = std::str::from_utf8(password)
        .map_err(|_| CryptoError::InvalidKey("password is not valid UTF-8".into()))?;
    derive_key(
        &PasswordString::new(text.to_owned()),
        salt,
        prf,
        rounds,
        output_length,
    )
}

/// Estimate the round count that makes one derivation take about `target`.
///
/// Times a probe derivation of [`PBKDF2_CALIBRATION_ROUNDS`] rounds with
/// inputs of the given sizes and scales linearly. Never returns less than 1.
pub fn calibrate_rounds(
    prf: Prf,
    password_len: usize,
    salt_len: usize,
    output_length: usize,
    target: Duration,
) -> Result<u32, CryptoError> {
    if output_length == 0 {
        return Err(CryptoError::Param("PBKDF2 output length must be ≥1".into()));
    }

    let password = vec![b'p'; password_len];
    let salt = vec![b's'; salt_len];
    let mut out = vec![0u8; output_length];

    let start = Instant::now();
    pbkdf2_into(prf, &password, &salt, PBKDF2_CALIBRATION_ROUNDS, &mut out)?;
    let elapsed = start.elapsed().as_secs_f64().max(f64::EPSILON);

    let rounds = (target.as_secs_f64() / elapsed * f64::from(PBKDF2_CALIBRATION_ROUNDS))
        .clamp(1.0, f64::from(u32::MAX));
    debug!(rounds, ?target, "PBKDF2 rounds calibrated");
    Ok(rounds as u32)
}

fn pbkdf2_into(
    prf: Prf,
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    out_key: &mut [u8],
) -> Result<(), CryptoError> {
    let result = match prf {
        Prf::HmacSha1 => pbkdf2::<Hmac<Sha1>>(password, salt, rounds, out_key),
        Prf::HmacSha224 => pbkdf2::<Hmac<Sha224>>(password, salt, rounds, out_key),
        Prf::HmacSha256 => pbkdf2::<Hmac<Sha256>>(password, salt, rounds, out_key),
        Prf::HmacSha384 => pbkdf2::<Hmac<Sha384>>(password, salt, rounds, out_key),
        Prf::HmacSha512 => pbkdf2::<Hmac<Sha512>>(password, salt, rounds, out_key),
    };
    result.map_err(|e| CryptoError::InvalidKey(format!("PBKDF2 failed: {e}")))
}
