//! tests/engine_tests.rs
//! Context creation, lifecycle and buffer contract

use cryptor_rs::{
    Algorithm, CipherContext, CryptOptions, CryptoError, Lifecycle, Mode, Operation, Padding,
};

fn aes_cbc(operation: Operation) -> CipherContext {
    let options = CryptOptions::new()
        .with_mode(Mode::Cbc)
        .with_padding(Padding::Pkcs7);
    CipherContext::create(operation, Algorithm::Aes, &options, &[0x11; 16], Some(&[0x22; 16]))
        .unwrap()
}

#[test]
fn create_rejects_bad_parameters() {
    let options = CryptOptions::new();

    let err = CipherContext::create(Operation::Encrypt, Algorithm::Aes, &options, &[0; 15], None)
        .unwrap_err();
    assert_eq!(
        err,
        CryptoError::KeySize {
            algorithm: Algorithm::Aes,
            len: 15
        }
    );

    let err =
        CipherContext::create(Operation::Encrypt, Algorithm::Des, &options, &[0; 8], Some(&[0; 16]))
            .unwrap_err();
    assert!(matches!(err, CryptoError::Param(_)));

    let err = CipherContext::create(
        Operation::Encrypt,
        Algorithm::Rc4,
        &CryptOptions::new().with_mode(Mode::Cbc),
        &[0; 16],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CryptoError::Unimplemented(_)));

    let err = CipherContext::create(
        Operation::Encrypt,
        Algorithm::Aes,
        &CryptOptions::new().with_tweak([0u8; 16]),
        &[0; 16],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CryptoError::Param(_)));

    let err = CipherContext::create(
        Operation::Encrypt,
        Algorithm::Aes,
        &CryptOptions::new().with_rounds(7),
        &[0; 16],
        None,
    )
    .unwrap_err();
    assert!(matches!(err, CryptoError::Unimplemented(_)));
}

#[test]
fn default_round_count_is_accepted() {
    let ctx = CipherContext::create(
        Operation::Encrypt,
        Algorithm::Aes,
        &CryptOptions::new().with_rounds(14),
        &[0; 32],
        None,
    );
    assert!(ctx.is_ok());
}

#[test]
fn key_sizes_per_algorithm() {
    let cases: [(Algorithm, usize, bool); 10] = [
        (Algorithm::Aes, 24, true),
        (Algorithm::Aes, 20, false),
        (Algorithm::Des, 7, false),
        (Algorithm::ThreeDes, 24, true),
        (Algorithm::Cast, 5, true),
        (Algorithm::Cast, 17, false),
        (Algorithm::Rc2, 1, true),
        (Algorithm::Rc4, 512, true),
        (Algorithm::Blowfish, 56, true),
        (Algorithm::Blowfish, 57, false),
    ];
    for (algorithm, len, ok) in cases {
        let key = vec![0x42; len];
        let result =
            CipherContext::create(Operation::Encrypt, algorithm, &CryptOptions::new(), &key, None);
        assert_eq!(result.is_ok(), ok, "{algorithm:?} with {len}-byte key");
    }
}

#[test]
fn lifecycle_transitions() {
    let mut ctx = aes_cbc(Operation::Encrypt);
    assert_eq!(ctx.state(), Lifecycle::Created);

    let mut out = [0u8; 64];
    ctx.update(b"hello", &mut out).unwrap();
    assert_eq!(ctx.state(), Lifecycle::Active);

    ctx.finalize(&mut out).unwrap();
    assert_eq!(ctx.state(), Lifecycle::Finalized);
    assert_eq!(ctx.update(b"more", &mut out), Err(CryptoError::CallSequence));
    assert_eq!(ctx.finalize(&mut out), Err(CryptoError::CallSequence));

    ctx.reset(None).unwrap();
    assert_eq!(ctx.state(), Lifecycle::Active);

    ctx.release();
    assert_eq!(ctx.state(), Lifecycle::Released);
    ctx.release();
    assert_eq!(ctx.reset(None), Err(CryptoError::CallSequence));
    assert_eq!(ctx.update(b"x", &mut out), Err(CryptoError::CallSequence));
}

#[test]
fn buffer_too_small_is_retryable() {
    let mut ctx = aes_cbc(Operation::Encrypt);
    let mut small = [0u8; 8];

    let err = ctx.update(&[0u8; 20], &mut small).unwrap_err();
    assert_eq!(err, CryptoError::BufferTooSmall { needed: 16 });
    assert!(err.is_retryable());
    assert_eq!(ctx.buffered_len(), 0);

    let mut out = [0u8; 16];
    assert_eq!(ctx.update(&[0u8; 20], &mut out).unwrap(), 16);
    assert_eq!(ctx.buffered_len(), 4);

    assert_eq!(
        ctx.finalize(&mut small),
        Err(CryptoError::BufferTooSmall { needed: 16 })
    );
    assert_eq!(ctx.state(), Lifecycle::Active);
    assert_eq!(ctx.finalize(&mut out).unwrap(), 16);
}

#[test]
fn output_length_contract() {
    let mut enc = aes_cbc(Operation::Encrypt);
    assert_eq!(enc.output_length(0, true), 16);
    assert_eq!(enc.output_length(15, false), 0);
    assert_eq!(enc.output_length(16, false), 16);
    assert_eq!(enc.output_length(16, true), 32);

    enc.update_to_vec(&[0u8; 5]).unwrap();
    assert_eq!(enc.output_length(11, false), 16);
    assert_eq!(enc.output_length(usize::MAX, false), usize::MAX);
    assert_eq!(
        enc.checked_output_length(usize::MAX, false),
        Err(CryptoError::Overflow)
    );

    // decryption holds back the last whole block until finalize
    let dec = aes_cbc(Operation::Decrypt);
    assert_eq!(dec.output_length(16, false), 0);
    assert_eq!(dec.output_length(32, false), 16);
    assert_eq!(dec.output_length(32, true), 32);
}

#[test]
fn unaligned_input_without_padding_fails_alignment() {
    let options = CryptOptions::new()
        .with_mode(Mode::Ecb)
        .with_padding(Padding::None);
    let mut ctx =
        CipherContext::create(Operation::Encrypt, Algorithm::Aes, &options, &[0; 16], None)
            .unwrap();
    ctx.update_to_vec(&[0u8; 20]).unwrap();
    assert_eq!(ctx.finalize_to_vec(), Err(CryptoError::Alignment));
    assert_eq!(ctx.state(), Lifecycle::Finalized);
}

#[test]
fn corrupted_padding_fails_decode() {
    let mut enc = aes_cbc(Operation::Encrypt);
    let mut ct = enc.update_to_vec(b"sixteen byte msg").unwrap();
    ct.extend(enc.finalize_to_vec().unwrap());

    // flips the last padding byte of the final block to 0xef
    let target = ct.len() - 17;
    ct[target] ^= 0xff;

    let mut dec = aes_cbc(Operation::Decrypt);
    dec.update_to_vec(&ct).unwrap();
    assert_eq!(dec.finalize_to_vec(), Err(CryptoError::Decode));
}

#[test]
fn truncated_ciphertext_fails_decode() {
    let mut dec = aes_cbc(Operation::Decrypt);
    dec.update_to_vec(&[0u8; 20]).unwrap();
    assert_eq!(dec.finalize_to_vec(), Err(CryptoError::Decode));
}

#[test]
fn reset_restarts_cbc_chain() {
    let mut ctx = aes_cbc(Operation::Encrypt);
    let mut first = ctx.update_to_vec(b"repeat me please").unwrap();
    first.extend(ctx.finalize_to_vec().unwrap());

    ctx.reset(Some(&[0x22; 16])).unwrap();
    let mut second = ctx.update_to_vec(b"repeat me please").unwrap();
    second.extend(ctx.finalize_to_vec().unwrap());

    assert_eq!(first, second);
}

#[test]
fn reset_is_cbc_only() {
    let options = CryptOptions::new().with_mode(Mode::Ctr);
    let mut ctx =
        CipherContext::create(Operation::Encrypt, Algorithm::Aes, &options, &[0; 16], None)
            .unwrap();
    assert!(matches!(ctx.reset(None), Err(CryptoError::Unimplemented(_))));
}

#[test]
fn missing_iv_means_zero_iv() {
    let options = CryptOptions::new()
        .with_mode(Mode::Cbc)
        .with_padding(Padding::Pkcs7);
    let a = cryptor_rs::crypt_one_shot(
        Operation::Encrypt,
        Algorithm::Aes,
        &options,
        &[7; 16],
        None,
        b"abc",
    )
    .unwrap();
    let b = cryptor_rs::crypt_one_shot(
        Operation::Encrypt,
        Algorithm::Aes,
        &options,
        &[7; 16],
        Some(&[0; 16]),
        b"abc",
    )
    .unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_update_keeps_carried_bytes() {
    let options = CryptOptions::new()
        .with_mode(Mode::Cbc)
        .with_padding(Padding::Pkcs7);
    let plaintext = b"carried bytes across an empty update";

    let mut ctx = aes_cbc(Operation::Encrypt);
    let mut ct = ctx.update_to_vec(&plaintext[..5]).unwrap();
    assert_eq!(ctx.buffered_len(), 5);

    let mut out = [0u8; 16];
    assert_eq!(ctx.update(&[], &mut out), Ok(0));
    assert_eq!(ctx.buffered_len(), 5);
    assert_eq!(ctx.state(), Lifecycle::Active);

    ct.extend(ctx.update_to_vec(&plaintext[5..]).unwrap());
    ct.extend(ctx.finalize_to_vec().unwrap());

    let expected = cryptor_rs::crypt_one_shot(
        Operation::Encrypt,
        Algorithm::Aes,
        &options,
        &[0x11; 16],
        Some(&[0x22; 16]),
        plaintext,
    )
    .unwrap();
    assert_eq!(ct, expected);
}

#[test]
fn empty_update_keeps_held_back_block() {
    let plaintext = b"twenty byte message!";
    let mut enc = aes_cbc(Operation::Encrypt);
    let mut ct = enc.update_to_vec(plaintext).unwrap();
    ct.extend(enc.finalize_to_vec().unwrap());
    assert_eq!(ct.len(), 32);

    let mut dec = aes_cbc(Operation::Decrypt);
    let mut pt = dec.update_to_vec(&ct).unwrap();
    assert_eq!(pt.len(), 16);
    assert_eq!(dec.buffered_len(), 16);

    let mut out = [0u8; 16];
    assert_eq!(dec.update(&[], &mut out), Ok(0));
    assert_eq!(dec.buffered_len(), 16);
    assert_eq!(dec.state(), Lifecycle::Active);

    pt.extend(dec.finalize_to_vec().unwrap());
    assert_eq!(pt, plaintext);
}
