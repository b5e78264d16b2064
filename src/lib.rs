// src/lib.rs

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod engine;
pub mod error;
pub mod keywrap;
pub mod utils;

// Streaming engine: this is what most users import
pub use engine::{
    crypt_one_shot, Algorithm, AlgorithmProfile, CipherContext, CryptOptions, KeySizes,
    Lifecycle, Mode, Operation, Padding,
};
pub use error::CryptoError;

pub use builders::{CryptorBuilder, Pbkdf2Builder};
pub use crypto::digest::{digest, digest_length, DigestAlgorithm, DigestContext};
pub use crypto::hmac::{hmac, HmacContext};
pub use crypto::kdf::pbkdf2::{calibrate_rounds, derive_key, derive_key_from_bytes, Prf};
pub use crypto::rng::{random_bytes, random_fill, SecureRandomExt};
pub use keywrap::{unwrap, unwrapped_key_length, wrap, wrapped_key_length};
pub use utils::{from_hex, to_hex, HexExt};

#[cfg(feature = "batch-ops")]
pub use batch_ops::crypt_batch;
