//! PKCS#7 padding for the block-aligned modes.

use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater};

use crate::error::CryptoError;

/// Fill `block[filled..]` with the PKCS#7 pad value `block.len() - filled`.
///
/// `filled` is always `< block.len()`, so at least one pad byte is written.
#[inline]
pub(crate) fn pad_block(block: &mut [u8], filled: usize) {
    let pad = (block.len() - filled) as u8;
    block[filled..].fill(pad);
}

/// Number of plaintext bytes in a decrypted final block.
///
/// The pad value and every pad byte are checked without data-dependent
/// branches; any mismatch is a single [`CryptoError::Decode`].
pub(crate) fn unpadded_len(block: &[u8]) -> Result<usize, CryptoError> {
    let block_size = block.len();
    let pad = block[block_size - 1];

    let mut valid: Choice = !pad.ct_eq(&0) & !pad.ct_gt(&(block_size as u8));
    for (i, byte) in block.iter().enumerate() {
        let distance_from_end = (block_size - i) as u8;
        let in_pad = !distance_from_end.ct_gt(&pad);
        valid &= !in_pad | byte.ct_eq(&pad);
    }

    if bool::from(valid) {
        Ok(block_size - pad as usize)
    } else {
        Err(CryptoError::Decode)
    }
}
