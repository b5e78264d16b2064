//! One-call encryption/decryption over the streaming engine.

use tracing::instrument;

use crate::engine::algorithm::{Algorithm, Operation};
use crate::engine::context::{alloc_output, CipherContext, CryptOptions};
use crate::error::CryptoError;

/// Encrypt or decrypt `input` in one call.
///
/// Exactly `create → update → finalize → release`: the output is byte-identical
/// to streaming the same input in any number of chunks.
///
/// # Example
///
/// ```
/// use cryptor_rs::{crypt_one_shot, Algorithm, CryptOptions, Operation, Padding};
///
/// let key = [0x2bu8; 16];
/// let options = CryptOptions::new().with_padding(Padding::Pkcs7);
/// let ciphertext =
///     crypt_one_shot(Operation::Encrypt, Algorithm::Aes, &options, &key, None, b"attack at dawn")?;
/// assert_eq!(ciphertext.len(), 16);
///
/// let plaintext =
///     crypt_one_shot(Operation::Decrypt, Algorithm::Aes, &options, &key, None, &ciphertext)?;
/// assert_eq!(plaintext, b"attack at dawn");
/// # Ok::<(), cryptor_rs::CryptoError>(())
/// ```
#[instrument(
    skip_all,
    fields(operation = ?operation, algorithm = ?algorithm, input_len = input.len()),
    err
)]
pub fn crypt_one_shot(
    operation: Operation,
    algorithm: Algorithm,
    options: &CryptOptions,
    key: &[u8],
    iv: Option<&[u8]>,
    input: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let mut ctx = CipherContext::create(operation, algorithm, options, key, iv)?;

    let mut output = alloc_output(ctx.checked_output_length(input.len(), true)?)?;
    let written = ctx.update(input, &mut output)?;
    let flushed = ctx.finalize(&mut output[written..])?;
    ctx.release();

    output.truncate(written + flushed);
    Ok(output)
}
