//! Playground: basic signing, same-message aggregation, and timing of
//! per-signature verification against a single batched check.
//!
//! Run with `RUST_LOG=debug` to also see library events.

use std::time::Instant;

use bls_threshold::logging::init_tracing;
use bls_threshold::{Curve, PublicKey, SecretKey, Signature, aggregate_signatures, init};
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

const N: usize = 1000;
const HASH_SIZE: usize = 32;

fn main() {
    init_tracing(None);
    init(Curve::Bls12381).expect("init");

    time_naive_verification();
    time_batched_verification();
    sign_and_verify();
    simple_aggregate();
}

fn sign_and_verify() {
    let sk = SecretKey::random();
    let pk = sk.public_key();
    tracing::info!(hex = %pk.to_hex(), "public key (96 bytes)");

    let m = b"super special message";
    let sig = sk.sign(m);
    tracing::info!(hex = %sig.to_hex(), "signature (48 bytes)");

    if !sig.verify(&pk, m) {
        tracing::error!("signature does not verify");
        std::process::exit(1);
    }
    tracing::info!("signature verifies");
}

fn simple_aggregate() {
    let sk1 = SecretKey::random();
    let sk2 = SecretKey::random();
    let mut pk = sk1.public_key();
    pk.add_assign(&sk2.public_key());

    let m = b"super special message";
    let sig1 = sk1.sign(m);
    let sig2 = sk2.sign(m);
    tracing::info!(hex = %sig1.to_hex(), "signature 1");
    tracing::info!(hex = %sig2.to_hex(), "signature 2");

    let mut agg = sig1;
    agg.add_assign(&sig2);
    tracing::info!(hex = %agg.to_hex(), "signature 1 + 2");

    if !agg.verify(&pk, m) {
        tracing::error!("aggregate signature does not verify");
        std::process::exit(1);
    }
    tracing::info!("aggregate signature verifies");
}

fn random_digest() -> [u8; HASH_SIZE] {
    let mut data = [0u8; 256];
    OsRng.fill_bytes(&mut data);
    Sha256::digest(data).into()
}

fn time_batched_verification() {
    tracing::info!(n = N, "signing distinct digests");
    let mut pubs: Vec<PublicKey> = Vec::with_capacity(N);
    let mut hashes: Vec<[u8; HASH_SIZE]> = Vec::with_capacity(N);
    let mut sigs: Vec<Signature> = Vec::with_capacity(N);
    for _ in 0..N {
        let h = random_digest();
        let sk = SecretKey::random();
        pubs.push(sk.public_key());
        sigs.push(sk.sign_hash(&h).expect("sign_hash"));
        hashes.push(h);
    }
    let agg = aggregate_signatures(&sigs).expect("aggregate");

    let start = Instant::now();
    let ok = agg.verify_aggregated_hashes(&pubs, &hashes, HASH_SIZE, N);
    let elapsed = start.elapsed();
    if !ok {
        tracing::error!("aggregate signature does not verify");
        std::process::exit(1);
    }
    tracing::info!(n = N, ?elapsed, "batched aggregate verification");

    hashes[0][..4].copy_from_slice(&[0, 1, 2, 4]);
    if agg.verify_aggregated_hashes(&pubs, &hashes, HASH_SIZE, N) {
        tracing::error!("tampered batch still verifies");
        std::process::exit(1);
    }
    tracing::info!("tampered batch rejected");
}

fn time_naive_verification() {
    tracing::info!(n = N, "signing distinct messages");
    let mut pubs = Vec::with_capacity(N);
    let mut msgs = Vec::with_capacity(N);
    let mut sigs = Vec::with_capacity(N);
    for _ in 0..N {
        let m = random_digest();
        let sk = SecretKey::random();
        pubs.push(sk.public_key());
        sigs.push(sk.sign(&m));
        msgs.push(m);
    }

    let start = Instant::now();
    for ((sig, pk), m) in sigs.iter().zip(pubs.iter()).zip(msgs.iter()) {
        if !sig.verify(pk, m) {
            tracing::error!("signature does not verify");
            std::process::exit(1);
        }
    }
    tracing::info!(n = N, elapsed = ?start.elapsed(), "one-by-one verification");
}
