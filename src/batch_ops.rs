//! Parallel one-shot encryption/decryption of independent buffers.

use rayon::prelude::*;

use crate::engine::{crypt_one_shot, Algorithm, CryptOptions, Operation};
use crate::error::CryptoError;

/// Run [`crypt_one_shot`] over every input in parallel, same key and IV for all.
///
/// Output order matches input order. The first error aborts the batch.
pub fn crypt_batch(
    operation: Operation,
    algorithm: Algorithm,
    options: &CryptOptions,
    key: &[u8],
    iv: Option<&[u8]>,
    inputs: &[&[u8]],
) -> Result<Vec<Vec<u8>>, CryptoError> {
    inputs
        .par_iter()
        .map(|input| crypt_one_shot(operation, algorithm, options, key, iv, input))
        .collect()
}
