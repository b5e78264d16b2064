//! benches/kdf.rs
//! PBKDF2 cost per PRF and round count, plus RFC 3394 key wrap
use cryptor_rs::aliases::PasswordString;
use cryptor_rs::{derive_key, unwrap, wrap, Prf};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::time::Duration;

fn kdf_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("KDF");
    // Faster runs for slow high-round benches
    group.measurement_time(Duration::from_secs(8));
    group.sample_size(20);

    let pw = PasswordString::new("benchmark-password".to_string());
    let salt = [0x42u8; 16];

    for &rounds in &[1_000, 10_000, 100_000, 300_000] {
        let id = BenchmarkId::new("pbkdf2_sha256_rounds", rounds);
        group.bench_with_input(id, &rounds, |b, &rounds| {
            b.iter(|| {
                let key = derive_key(
                    black_box(&pw),
                    Some(black_box(&salt[..])),
                    Prf::HmacSha256,
                    rounds,
                    32,
                )
                .unwrap();
                black_box(key);
            });
        });
    }

    for prf in [Prf::HmacSha1, Prf::HmacSha512] {
        let id = BenchmarkId::new("pbkdf2_10000", format!("{prf:?}"));
        group.bench_function(id, |b| {
            b.iter(|| {
                let key = derive_key(black_box(&pw), Some(&salt[..]), prf, 10_000, 32).unwrap();
                black_box(key);
            });
        });
    }

    group.finish();
}

fn keywrap_benches(c: &mut Criterion) {
    let kek = [0x11u8; 32];
    let raw = [0x22u8; 32];
    let wrapped = wrap(&kek, &raw, None).unwrap();

    c.bench_function("keywrap_wrap_256", |b| {
        b.iter(|| black_box(wrap(black_box(&kek), black_box(&raw), None).unwrap()));
    });
    c.bench_function("keywrap_unwrap_256", |b| {
        b.iter(|| black_box(unwrap(black_box(&kek), black_box(&wrapped), None).unwrap()));
    });
}

criterion_group!(benches, kdf_benches, keywrap_benches);
criterion_main!(benches);
