//! # RFC 3394 AES Key Wrap
//!
//! Wraps one symmetric key under a key-encryption key (KEK). Every step of the
//! algorithm is a single AES block run through a [`CipherContext`] in ECB mode
//! without padding; the six-pass schedule and the integrity check live here.
//!
//! The wrapped blob is always 8 bytes longer than the raw key.

use subtle::ConstantTimeEq;
use tracing::{debug, instrument};
use zeroize::Zeroize;

use crate::aliases::{KeyBytes, SpanBuffer};
use crate::consts::{KEYWRAP_MIN_KEY_SIZE, KEYWRAP_SEMIBLOCK, RFC3394_DEFAULT_IV};
use crate::engine::{Algorithm, CipherContext, CryptOptions, Mode, Operation, Padding};
use crate::error::CryptoError;
use crate::utils::xor_in_place;

type WrapBlock16 = SpanBuffer<16>;

/// Length of the blob produced by wrapping a key of `raw_len` bytes.
#[inline]
pub const fn wrapped_key_length(raw_len: usize) -> usize {
    raw_len + KEYWRAP_SEMIBLOCK
}

/// Length of the key recovered from a blob of `wrapped_len` bytes.
#[inline]
pub const fn unwrapped_key_length(wrapped_len: usize) -> usize {
    wrapped_len.saturating_sub(KEYWRAP_SEMIBLOCK)
}

/// Wrap `raw_key` under `kek` (RFC 3394 §2.2.1).
///
/// `iv` defaults to `A6A6A6A6A6A6A6A6`.
///
/// # Errors
///
/// - [`CryptoError::Param`] if `raw_key` is shorter than 16 bytes or not a
///   multiple of 8, or `iv` is not 8 bytes
/// - [`CryptoError::KeySize`] if `kek` is not a valid AES key
#[instrument(skip_all, fields(kek_len = kek.len(), key_len = raw_key.len()), err)]
pub fn wrap(kek: &[u8], raw_key: &[u8], iv: Option<&[u8]>) -> Result<Vec<u8>, CryptoError> {
    let iv = initial_value(iv)?;
    if raw_key.len() < KEYWRAP_MIN_KEY_SIZE || raw_key.len() % KEYWRAP_SEMIBLOCK != 0 {
        return Err(CryptoError::Param(format!(
            "key to wrap must be a multiple of 8 bytes and at least 16, got {}",
            raw_key.len()
        )));
    }

    let mut ctx = ecb_context(Operation::Encrypt, kek)?;
    let n = raw_key.len() / KEYWRAP_SEMIBLOCK;
    let mut a = iv;
    let mut r = KeyBytes::new(raw_key.to_vec());
    let mut input = WrapBlock16::new([0u8; 16]);
    let mut output = WrapBlock16::new([0u8; 16]);

    for j in 0..6 {
        for i in 0..n {
            let semiblock = i * KEYWRAP_SEMIBLOCK..(i + 1) * KEYWRAP_SEMIBLOCK;
            input.expose_secret_mut()[..8].copy_from_slice(&a);
            input.expose_secret_mut()[8..].copy_from_slice(&r.expose_secret()[semiblock.clone()]);

            ctx.update(input.expose_secret(), output.expose_secret_mut())?;

            let t = (n * j + i + 1) as u64;
            a.copy_from_slice(&output.expose_secret()[..8]);
            xor_in_place(&mut a, &t.to_be_bytes());
            r.expose_secret_mut()[semiblock].copy_from_slice(&output.expose_secret()[8..]);
        }
    }
    ctx.finalize(&mut [])?;

    let mut wrapped = Vec::with_capacity(wrapped_key_length(raw_key.len()));
    wrapped.extend_from_slice(&a);
    wrapped.extend_from_slice(r.expose_secret());
    debug!(wrapped_len = wrapped.len(), "key wrapped");
    Ok(wrapped)
}

/// Unwrap a blob produced by [`wrap`] (RFC 3394 §2.2.2).
///
/// The recovered integrity value is compared in constant time. A wrong KEK
/// and a corrupted blob both fail with the same [`CryptoError::Decode`].
///
/// # Errors
///
/// - [`CryptoError::Param`] if `wrapped` is shorter than 24 bytes or not a
///   multiple of 8, or `iv` is not 8 bytes
/// - [`CryptoError::KeySize`] if `kek` is not a valid AES key
/// - [`CryptoError::Decode`] if the integrity check fails
#[instrument(skip_all, fields(kek_len = kek.len(), wrapped_len = wrapped.len()), err)]
pub fn unwrap(kek: &[u8], wrapped: &[u8], iv: Option<&[u8]>) -> Result<KeyBytes, CryptoError> {
    let iv = initial_value(iv)?;
    if wrapped.len() < wrapped_key_length(KEYWRAP_MIN_KEY_SIZE)
        || wrapped.len() % KEYWRAP_SEMIBLOCK != 0
    {
        return Err(CryptoError::Param(format!(
            "wrapped key must be a multiple of 8 bytes and at least 24, got {}",
            wrapped.len()
        )));
    }

    let mut ctx = ecb_context(Operation::Decrypt, kek)?;
    let n = unwrapped_key_length(wrapped.len()) / KEYWRAP_SEMIBLOCK;
    let mut a = [0u8; KEYWRAP_SEMIBLOCK];
    a.copy_from_slice(&wrapped[..KEYWRAP_SEMIBLOCK]);
    let mut r = KeyBytes::new(wrapped[KEYWRAP_SEMIBLOCK..].to_vec());
    let mut input = WrapBlock16::new([0u8; 16]);
    let mut output = WrapBlock16::new([0u8; 16]);

    for j in (0..6).rev() {
        for i in (0..n).rev() {
            let semiblock = i * KEYWRAP_SEMIBLOCK..(i + 1) * KEYWRAP_SEMIBLOCK;
            let t = (n * j + i + 1) as u64;
            xor_in_place(&mut a, &t.to_be_bytes());
            input.expose_secret_mut()[..8].copy_from_slice(&a);
            input.expose_secret_mut()[8..].copy_from_slice(&r.expose_secret()[semiblock.clone()]);

            ctx.update(input.expose_secret(), output.expose_secret_mut())?;

            a.copy_from_slice(&output.expose_secret()[..8]);
            r.expose_secret_mut()[semiblock].copy_from_slice(&output.expose_secret()[8..]);
        }
    }
    ctx.finalize(&mut [])?;

    if !bool::from(a[..].ct_eq(&iv[..])) {
        r.expose_secret_mut().zeroize();
        a.zeroize();
        debug!("key unwrap integrity check failed");
        return Err(CryptoError::Decode);
    }

    Ok(r)
}

fn initial_value(iv: Option<&[u8]>) -> Result<[u8; KEYWRAP_SEMIBLOCK], CryptoError> {
    match iv {
        None => Ok(RFC3394_DEFAULT_IV),
        Some(iv) => iv.try_into().map_err(|_| {
            CryptoError::Param(format!("key wrap IV must be 8 bytes, got {}", iv.len()))
        }),
    }
}

fn ecb_context(operation: Operation, kek: &[u8]) -> Result<CipherContext, CryptoError> {
    CipherContext::create(
        operation,
        Algorithm::Aes,
        &CryptOptions::new()
            .with_mode(Mode::Ecb)
            .with_padding(Padding::None),
        kek,
        None,
    )
}
