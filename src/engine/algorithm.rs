//! Algorithm, mode and padding tags plus the immutable per-algorithm profile.

use crate::consts::{
    AES_BLOCK_SIZE, AES_KEY_SIZES, BLOCK_SIZE_64, BLOWFISH_MAX_KEY_SIZE, BLOWFISH_MIN_KEY_SIZE,
    CAST_MAX_KEY_SIZE, CAST_MIN_KEY_SIZE, DES_KEY_SIZE, RC2_MAX_KEY_SIZE, RC2_MIN_KEY_SIZE,
    RC4_MAX_KEY_SIZE, RC4_MIN_KEY_SIZE, TRIPLE_DES_KEY_SIZE,
};

/// Direction of a cipher context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

/// Symmetric algorithms the engine can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Aes,
    Des,
    ThreeDes,
    Cast,
    Rc4,
    Rc2,
    Blowfish,
}

/// Chaining mode.
///
/// `Ecb` and `Cbc` work on whole blocks and honour [`Padding`]. The feedback
/// and counter modes turn the block cipher into a keystream and are
/// byte-granular, like `Stream` (RC4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Ecb,
    Cbc,
    /// Full-block cipher feedback.
    Cfb,
    /// 8-bit cipher feedback.
    Cfb8,
    Ofb,
    /// Big-endian counter over the whole block.
    Ctr,
    Stream,
}

impl Mode {
    /// Modes whose output is produced one whole block at a time.
    #[inline]
    pub const fn is_block_aligned(self) -> bool {
        matches!(self, Mode::Ecb | Mode::Cbc)
    }

    /// Modes that read the IV.
    #[inline]
    pub const fn uses_iv(self) -> bool {
        !matches!(self, Mode::Ecb | Mode::Stream)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Padding {
    #[default]
    None,
    Pkcs7,
}

/// Valid key lengths for an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySizes {
    /// One of a fixed set of lengths.
    Exact(&'static [usize]),
    /// Any length in `min..=max`.
    Range { min: usize, max: usize },
}

impl KeySizes {
    #[inline]
    pub fn contains(&self, len: usize) -> bool {
        match *self {
            KeySizes::Exact(sizes) => sizes.contains(&len),
            KeySizes::Range { min, max } => (min..=max).contains(&len),
        }
    }
}

/// Immutable metadata for one algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmProfile {
    /// Block size in bytes; `1` for stream ciphers.
    pub block_size: usize,
    pub key_sizes: KeySizes,
    /// Expected IV length; equals the block size, `0` for stream ciphers.
    pub iv_len: usize,
    /// Mode picked when the caller does not name one.
    pub default_mode: Mode,
}

const fn block_profile(block_size: usize, key_sizes: KeySizes) -> AlgorithmProfile {
    AlgorithmProfile {
        block_size,
        key_sizes,
        iv_len: block_size,
        default_mode: Mode::Cbc,
    }
}

const AES_PROFILE: AlgorithmProfile = block_profile(AES_BLOCK_SIZE, KeySizes::Exact(AES_KEY_SIZES));
const DES_PROFILE: AlgorithmProfile =
    block_profile(BLOCK_SIZE_64, KeySizes::Exact(&[DES_KEY_SIZE]));
const THREE_DES_PROFILE: AlgorithmProfile =
    block_profile(BLOCK_SIZE_64, KeySizes::Exact(&[TRIPLE_DES_KEY_SIZE]));
const CAST_PROFILE: AlgorithmProfile = block_profile(
    BLOCK_SIZE_64,
    KeySizes::Range {
        min: CAST_MIN_KEY_SIZE,
        max: CAST_MAX_KEY_SIZE,
    },
);
const RC2_PROFILE: AlgorithmProfile = block_profile(
    BLOCK_SIZE_64,
    KeySizes::Range {
        min: RC2_MIN_KEY_SIZE,
        max: RC2_MAX_KEY_SIZE,
    },
);
const BLOWFISH_PROFILE: AlgorithmProfile = block_profile(
    BLOCK_SIZE_64,
    KeySizes::Range {
        min: BLOWFISH_MIN_KEY_SIZE,
        max: BLOWFISH_MAX_KEY_SIZE,
    },
);
const RC4_PROFILE: AlgorithmProfile = AlgorithmProfile {
    block_size: 1,
    key_sizes: KeySizes::Range {
        min: RC4_MIN_KEY_SIZE,
        max: RC4_MAX_KEY_SIZE,
    },
    iv_len: 0,
    default_mode: Mode::Stream,
};

impl Algorithm {
    /// Profile lookup by tag.
    #[inline]
    pub const fn profile(self) -> &'static AlgorithmProfile {
        match self {
            Algorithm::Aes => &AES_PROFILE,
            Algorithm::Des => &DES_PROFILE,
            Algorithm::ThreeDes => &THREE_DES_PROFILE,
            Algorithm::Cast => &CAST_PROFILE,
            Algorithm::Rc4 => &RC4_PROFILE,
            Algorithm::Rc2 => &RC2_PROFILE,
            Algorithm::Blowfish => &BLOWFISH_PROFILE,
        }
    }

    #[inline]
    pub const fn block_size(self) -> usize {
        self.profile().block_size
    }

    #[inline]
    pub const fn is_stream_cipher(self) -> bool {
        matches!(self, Algorithm::Rc4)
    }

    /// Whether this algorithm can run in `mode`.
    #[inline]
    pub const fn supports(self, mode: Mode) -> bool {
        match mode {
            Mode::Stream => self.is_stream_cipher(),
            _ => !self.is_stream_cipher(),
        }
    }

    /// Round count the provider uses for a key of `key_len` bytes.
    ///
    /// `None` for RC4, which has no rounds.
    pub const fn default_rounds(self, key_len: usize) -> Option<u32> {
        match self {
            Algorithm::Aes => Some(match key_len {
                16 => 10,
                24 => 12,
                _ => 14,
            }),
            Algorithm::Des => Some(16),
            Algorithm::ThreeDes => Some(48),
            // RFC 2144 §2.5: keys of 80 bits or less use 12 rounds
            Algorithm::Cast => Some(if key_len <= 10 { 12 } else { 16 }),
            Algorithm::Rc2 => Some(16),
            Algorithm::Blowfish => Some(16),
            Algorithm::Rc4 => None,
        }
    }
}
