//! # Constants
//!
//! Block sizes, key-size bounds, PBKDF2 defaults and RFC 3394 parameters used
//! throughout the library.

/// Largest block size of any supported algorithm (AES).
pub const MAX_BLOCK_SIZE: usize = 16;

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// Block size shared by DES, 3DES, CAST5, RC2 and Blowfish.
pub const BLOCK_SIZE_64: usize = 8;

/// Valid AES key lengths (AES-128, AES-192, AES-256).
pub const AES_KEY_SIZES: &[usize] = &[16, 24, 32];

pub const DES_KEY_SIZE: usize = 8;
pub const TRIPLE_DES_KEY_SIZE: usize = 24;

pub const CAST_MIN_KEY_SIZE: usize = 5;
pub const CAST_MAX_KEY_SIZE: usize = 16;

pub const RC4_MIN_KEY_SIZE: usize = 1;
pub const RC4_MAX_KEY_SIZE: usize = 512;

pub const RC2_MIN_KEY_SIZE: usize = 1;
pub const RC2_MAX_KEY_SIZE: usize = 128;

pub const BLOWFISH_MIN_KEY_SIZE: usize = 8;
pub const BLOWFISH_MAX_KEY_SIZE: usize = 56;

/// Minimum allowed PBKDF2 round count.
pub const PBKDF2_MIN_ROUNDS: u32 = 1;

/// Default PBKDF2 round count for [`Pbkdf2Builder`](crate::Pbkdf2Builder).
///
/// Set to `300_000`, in line with current OWASP guidance for HMAC-SHA256.
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 300_000;

/// Default derived key length (32 bytes = 256-bit key).
pub const DEFAULT_PBKDF2_LENGTH: usize = 32;

/// Default salt size generated by the builder (16 bytes).
pub const DEFAULT_SALT_SIZE: usize = 16;

/// Rounds used for the timing probe in [`calibrate_rounds`](crate::calibrate_rounds).
pub const PBKDF2_CALIBRATION_ROUNDS: u32 = 10_000;

/// RFC 3394 §2.2.3.1 default initial value.
pub const RFC3394_DEFAULT_IV: [u8; 8] = [0xA6; 8];

/// RFC 3394 semiblock size.
pub const KEYWRAP_SEMIBLOCK: usize = 8;

/// Smallest key RFC 3394 will wrap (two semiblocks).
pub const KEYWRAP_MIN_KEY_SIZE: usize = 16;
