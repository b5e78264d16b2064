// src/crypto/hmac.rs
//! HMAC over the digests in [`DigestAlgorithm`].
//!
//! Tag verification goes through `Mac::verify_slice`, which compares in
//! constant time.

use hmac::Mac;

use crate::aliases::{HmacMd5, HmacSha1, HmacSha224, HmacSha256, HmacSha384, HmacSha512};
use crate::crypto::digest::DigestAlgorithm;
use crate::error::CryptoError;

#[derive(Clone)]
enum Keyed {
    Md5(HmacMd5),
    Sha1(HmacSha1),
    Sha224(HmacSha224),
    Sha256(HmacSha256),
    Sha384(HmacSha384),
    Sha512(HmacSha512),
}

macro_rules! keyed {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            Keyed::Md5($m) => $body,
            Keyed::Sha1($m) => $body,
            Keyed::Sha224($m) => $body,
            Keyed::Sha256($m) => $body,
            Keyed::Sha384($m) => $body,
            Keyed::Sha512($m) => $body,
        }
    };
}

/// Incremental HMAC.
#[derive(Clone)]
pub struct HmacContext {
    algorithm: DigestAlgorithm,
    mac: Keyed,
}

impl HmacContext {
    /// Key a new HMAC. Any key length is accepted.
    pub fn new(algorithm: DigestAlgorithm, key: &[u8]) -> Result<Self, CryptoError> {
        let invalid = |_| CryptoError::InvalidKey("HMAC key rejected".into());
        let mac = match algorithm {
            DigestAlgorithm::Md5 => {
                Keyed::Md5(<HmacMd5 as Mac>::new_from_slice(key).map_err(invalid)?)
            }
            DigestAlgorithm::Sha1 => {
                Keyed::Sha1(<HmacSha1 as Mac>::new_from_slice(key).map_err(invalid)?)
            }
            DigestAlgorithm::Sha224 => {
                Keyed::Sha224(<HmacSha224 as Mac>::new_from_slice(key).map_err(invalid)?)
            }
            DigestAlgorithm::Sha256 => {
                Keyed::Sha256(<HmacSha256 as Mac>::new_from_slice(key).map_err(invalid)?)
            }
            DigestAlgorithm::Sha384 => {
                Keyed::Sha384(<HmacSha384 as Mac>::new_from_slice(key).map_err(invalid)?)
            }
            DigestAlgorithm::Sha512 => {
                Keyed::Sha512(<HmacSha512 as Mac>::new_from_slice(key).map_err(invalid)?)
            }
        };
        Ok(Self { algorithm, mac })
    }

    #[inline]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn update(&mut self, data: &[u8]) {
        keyed!(&mut self.mac, m => m.update(data))
    }

    /// The authentication tag.
    pub fn finalize(self) -> Vec<u8> {
        keyed!(self.mac, m => m.finalize().into_bytes().to_vec())
    }

    /// Check `tag` in constant time; mismatch is [`CryptoError::Decode`].
    pub fn verify(self, tag: &[u8]) -> Result<(), CryptoError> {
        keyed!(self.mac, m => m.verify_slice(tag).map_err(|_| CryptoError::Decode))
    }
}

/// HMAC of `data` under `key` in one call.
pub fn hmac(algorithm: DigestAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut ctx = HmacContext::new(algorithm, key)?;
    ctx.update(data);
    Ok(ctx.finalize())
}
