//! Threshold signing end to end.
//!
//! 1. A dealer splits a secret key into `n` shares with threshold `t` and
//!    publishes the master public key.
//! 2. Each shareholder signs the message with its share; anyone can check a
//!    partial signature against the public share derived from the master
//!    public key.
//! 3. Any `t` partials recover the signature of the original key, which
//!    verifies under the published public key.
//!
//! Shares and keys are passed around in their wire encoding to show what
//! a real deployment would transmit.

use bls_threshold::logging::init_tracing;
use bls_threshold::{
    Curve, ID, MasterPublicKey, Params, SecretKey, Signature, Wire, deal, init, recover_public_key,
    recover_signature,
};

fn main() {
    init_tracing(Some("info,bls_threshold=debug"));
    init(Curve::Bls12381).expect("init");

    let params = Params { n: 5, t: 3 };
    let sec = SecretKey::random();
    let (mpk, shares) = deal(&sec, params).expect("deal");
    tracing::info!(n = params.n, t = params.t, pk = %mpk.public_key().to_hex(), "dealt shares");

    // Publish the master public key.
    let mpk_bytes = mpk.encode();
    let mpk = MasterPublicKey::decode(&mpk_bytes).expect("decode master public key");
    tracing::info!(bytes = mpk_bytes.len(), "master public key on the wire");

    let m = b"release block 42";
    let mut partials: Vec<(ID, Signature)> = Vec::new();
    for (id, share) in shares.iter().skip(1).take(params.t as usize) {
        let wire = share.sign(m).encode();
        let partial = Signature::decode(&wire).expect("decode partial");

        let pk_i = mpk.derive_public_share(id).expect("public share");
        if !partial.verify(&pk_i, m) {
            tracing::error!(id = %id.to_dec_string(), "partial signature rejected");
            std::process::exit(1);
        }
        tracing::info!(id = %id.to_dec_string(), "partial signature accepted");
        partials.push((*id, partial));
    }

    let sig = recover_signature(&partials).expect("recover_signature");
    if !sig.verify(mpk.public_key(), m) {
        tracing::error!("recovered signature does not verify");
        std::process::exit(1);
    }
    assert_eq!(sig, sec.sign(m));
    tracing::info!(sig = %sig.to_hex(), "recovered signature verifies");

    let pub_shares: Vec<_> = partials
        .iter()
        .map(|(id, _)| (*id, mpk.derive_public_share(id).expect("public share")))
        .collect();
    let pk = recover_public_key(&pub_shares).expect("recover_public_key");
    assert_eq!(&pk, mpk.public_key());
    tracing::info!("public key recovered from public shares");
}
