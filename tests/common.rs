//! tests/common.rs
//! Common constants and utilities shared across test files

/// Fast round count for tests - performance testing is in benches/
#[allow(dead_code)] // Used across multiple test files
pub const TEST_ROUNDS: u32 = 5;

#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "Hello";

#[allow(dead_code)]
pub const TEST_DATA: &[u8] = b"test data";

/// Spans several blocks for every cipher, with a partial tail
#[allow(dead_code)]
pub const TEST_DATA_LONG: &[u8] =
    b"The quick brown fox jumps over the lazy dog while the cat watches";

/// AES-128 key from NIST SP 800-38A
#[allow(dead_code)]
pub const SP800_38A_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";

/// First two plaintext blocks from NIST SP 800-38A
#[allow(dead_code)]
pub const SP800_38A_PLAINTEXT: &str =
    "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51";

/// Decode hex or panic; test-only shorthand.
#[allow(dead_code)]
pub fn h(text: &str) -> Vec<u8> {
    cryptor_rs::from_hex(text).expect("valid hex in test vector")
}
