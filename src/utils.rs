//! Byte helpers used across the library: hex conversion and block XOR.

use crate::error::CryptoError;

/// Encode bytes as an uppercase hex string.
///
/// ```
/// assert_eq!(cryptor_rs::utils::to_hex(&[0x0a, 0xff]), "0AFF");
/// ```
#[inline]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode a hex string, accepting either letter case.
///
/// Odd-length input and non-hex characters fail with [`CryptoError::Decode`].
#[inline]
pub fn from_hex(text: &str) -> Result<Vec<u8>, CryptoError> {
    hex::decode(text).map_err(|_| CryptoError::Decode)
}

/// `.hex_string()` on any byte slice.
pub trait HexExt {
    fn hex_string(&self) -> String;
}

impl HexExt for [u8] {
    #[inline]
    fn hex_string(&self) -> String {
        to_hex(self)
    }
}

/// XORs `src` into `dst` byte by byte over the shorter of the two.
///
/// Used by every chaining mode in the engine; callers always pass slices of
/// exactly one block or one keystream segment.
#[inline(always)]
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= *s;
    }
}
