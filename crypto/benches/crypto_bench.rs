use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aerial_types::AccountAddress;

fn sha256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("sha256_256B", |b| {
        b.iter(|| aerial_crypto::sha256(black_box(&data)))
    });
}

fn sha256_multi_bench(c: &mut Criterion) {
    let parts: Vec<&[u8]> = vec![&[1u8; 32], &[2u8; 64], &[3u8; 128]];

    c.bench_function("sha256_multi_3parts", |b| {
        b.iter(|| aerial_crypto::sha256_multi(black_box(&parts)))
    });
}

fn derive_history_key_bench(c: &mut Criterion) {
    let address = AccountAddress::parse("account_0000000000000000000000000000000001")
        .expect("valid address");

    c.bench_function("derive_history_key", |b| {
        b.iter(|| aerial_crypto::derive_history_key(black_box(&address)))
    });
}

criterion_group!(
    benches,
    sha256_bench,
    sha256_multi_bench,
    derive_history_key_bench
);
criterion_main!(benches);
