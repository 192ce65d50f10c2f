use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stels_types::TxHash;

fn domain() -> Vec<String> {
    vec!["stels".into(), "testnet".into(), "token".into()]
}

fn ecdsa_sign_bench(c: &mut Criterion) {
    let kp = stels_crypto::generate_keypair().unwrap();
    let hash = TxHash::new([42u8; 32]);
    let domain = domain();

    c.bench_function("secp256k1_sign_hash", |b| {
        b.iter(|| stels_crypto::sign_hash(black_box(&hash), &domain, &kp.private))
    });
}

fn ecdsa_verify_bench(c: &mut Criterion) {
    let kp = stels_crypto::generate_keypair().unwrap();
    let hash = TxHash::new([42u8; 32]);
    let domain = domain();
    let sig = stels_crypto::sign_hash(&hash, &domain, &kp.private).unwrap();

    c.bench_function("secp256k1_verify_hash", |b| {
        b.iter(|| stels_crypto::verify_hash(black_box(&hash), &domain, &sig, &kp.public))
    });
}

fn sha256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("sha256_256B", |b| {
        b.iter(|| stels_crypto::sha256(black_box(&data)))
    });
}

fn hash_canonical_bench(c: &mut Criterion) {
    let canonical = r#"{"amount":"10.50","currency":"USDT","fee":"0.01","from":"0xA","network":{"chain_id":1,"id":"testnet"},"prev_hash":null,"timestamp":1700000000000,"to":"0xB","token_id":"tok1","type":"asset.transfer","version":"1.0"}"#;

    c.bench_function("hash_canonical_transfer", |b| {
        b.iter(|| stels_crypto::hash_canonical(black_box(canonical)))
    });
}

criterion_group!(
    benches,
    ecdsa_sign_bench,
    ecdsa_verify_bench,
    sha256_bench,
    hash_canonical_bench
);
criterion_main!(benches);
