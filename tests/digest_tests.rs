//! tests/digest_tests.rs
//! RFC 1321 / FIPS 180 digests and RFC 2104 / RFC 4231 HMAC vectors

mod common;

use common::h;
use cryptor_rs::{
    digest, digest_length, hmac, CryptoError, DigestAlgorithm, DigestContext, HmacContext,
};

#[test]
fn abc_digests() {
    let cases = [
        (DigestAlgorithm::Md5, "900150983cd24fb0d6963f7d28e17f72"),
        (
            DigestAlgorithm::Sha1,
            "a9993e364706816aba3e25717850c26c9cd0d89d",
        ),
        (
            DigestAlgorithm::Sha224,
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
        ),
        (
            DigestAlgorithm::Sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ),
    ];
    for (algorithm, expected) in cases {
        let out = digest(algorithm, b"abc");
        assert_eq!(out, h(expected), "{algorithm:?}");
        assert_eq!(out.len(), algorithm.output_len());
    }
    assert_eq!(digest(DigestAlgorithm::Sha384, b"abc").len(), 48);
    assert_eq!(digest_length(DigestAlgorithm::Sha384), 48);
    assert_eq!(digest(DigestAlgorithm::Sha512, b"abc").len(), 64);
}

#[test]
fn incremental_digest_matches_one_shot() {
    let mut ctx = DigestContext::new(DigestAlgorithm::Sha512);
    ctx.update(b"a");
    ctx.update(b"");
    ctx.update(b"bc");
    assert_eq!(ctx.finalize(), digest(DigestAlgorithm::Sha512, b"abc"));
}

#[test]
fn rfc4231_case_2() {
    let tag = hmac(
        DigestAlgorithm::Sha256,
        b"Jefe",
        b"what do ya want for nothing?",
    )
    .unwrap();
    assert_eq!(
        tag,
        h("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
    );
}

#[test]
fn rfc2104_hmac_md5() {
    let tag = hmac(
        DigestAlgorithm::Md5,
        b"Jefe",
        b"what do ya want for nothing?",
    )
    .unwrap();
    assert_eq!(tag, h("750c783e6ab0b503eaa86e310a5db738"));
    assert_eq!(digest_length(DigestAlgorithm::Md5), 16);
}

#[test]
fn hmac_verify() {
    let key = b"Jefe";
    let data = b"what do ya want for nothing?";
    let tag = hmac(DigestAlgorithm::Sha384, key, data).unwrap();

    let mut ctx = HmacContext::new(DigestAlgorithm::Sha384, key).unwrap();
    ctx.update(data);
    assert!(ctx.verify(&tag).is_ok());

    let mut bad = tag.clone();
    bad[0] ^= 1;
    let mut ctx = HmacContext::new(DigestAlgorithm::Sha384, key).unwrap();
    ctx.update(data);
    assert_eq!(ctx.verify(&bad), Err(CryptoError::Decode));
}
