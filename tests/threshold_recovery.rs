use bls_threshold::{
    Error, ID, MasterSecretKey, Params, PublicKey, SecretKey, Signature, deal_from_rng,
    recover_public_key, recover_secret, recover_signature,
};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

const ID_TABLE: [u8; 5] = [3, 5, 193, 22, 15];

struct Shares {
    ids: Vec<ID>,
    secs: Vec<SecretKey>,
    pubs: Vec<PublicKey>,
    sigs: Vec<Signature>,
}

fn sign_with_each_share(msk: &MasterSecretKey, m: &[u8]) -> Shares {
    let mpk = msk.public_key();
    let mut out = Shares {
        ids: Vec::new(),
        secs: Vec::new(),
        pubs: Vec::new(),
        sigs: Vec::new(),
    };
    for b in ID_TABLE {
        let id = ID::from_le_slice(&[b, 0, 0, 0, 0, 0]).expect("id");
        let sec = msk.derive_share(&id).expect("derive_share");
        let public = mpk.derive_public_share(&id).expect("derive_public_share");
        assert_eq!(public, sec.public_key(), "public share derivation mismatch");

        let sig = sec.sign(m);
        assert!(sig.verify(&public, m), "share signature does not verify");

        out.ids.push(id);
        out.secs.push(sec);
        out.pubs.push(public);
        out.sigs.push(sig);
    }
    out
}

fn pick<T: Copy>(ids: &[ID], values: &[T], mask: u32) -> Vec<(ID, T)> {
    ids.iter()
        .zip(values.iter())
        .enumerate()
        .filter(|(i, _)| mask & (1u32 << *i) != 0)
        .map(|(_, (id, v))| (*id, *v))
        .collect()
}

#[test]
fn three_of_five_recovers_key_public_key_and_signature() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    let m = b"testSign";
    let sec0 = SecretKey::random_from_rng(&mut rng);
    let pub0 = sec0.public_key();
    let sig0 = sec0.sign(m);
    assert!(sig0.verify(&pub0, m));

    let k = 3;
    let msk = MasterSecretKey::generate_from_rng(&sec0, k, &mut rng).expect("msk");
    assert_eq!(msk.threshold(), k);
    assert_eq!(msk.secret_key(), &sec0);
    assert_eq!(msk.public_key().public_key(), &pub0);

    let shares = sign_with_each_share(&msk, m);
    for mask in 1u32..(1 << ID_TABLE.len()) {
        let count = mask.count_ones() as usize;
        let sec = recover_secret(&pick(&shares.ids, &shares.secs, mask)).expect("recover_secret");
        let public =
            recover_public_key(&pick(&shares.ids, &shares.pubs, mask)).expect("recover_public_key");
        let sig =
            recover_signature(&pick(&shares.ids, &shares.sigs, mask)).expect("recover_signature");
        if count >= k {
            assert_eq!(sec, sec0, "mask {mask:#07b}");
            assert_eq!(public, pub0, "mask {mask:#07b}");
            assert_eq!(sig, sig0, "mask {mask:#07b}");
        } else {
            assert_ne!(sec, sec0, "mask {mask:#07b}");
            assert_ne!(public, pub0, "mask {mask:#07b}");
            assert!(!sig.verify(&pub0, m), "mask {mask:#07b}");
        }
    }
}

#[test]
fn large_threshold_recovery() {
    let mut rng = ChaCha20Rng::seed_from_u64(3000);
    let k = 300;
    let sec = SecretKey::random_from_rng(&mut rng);
    let msk = MasterSecretKey::generate_from_rng(&sec, k, &mut rng).expect("msk");
    let ids: Vec<ID> = (0..k)
        .map(|i| ID::from_le_slice(&[(i & 255) as u8, (i >> 8) as u8, 2, 3, 4, 5]).expect("id"))
        .collect();
    let shares = msk.derive_shares(&ids).expect("derive_shares");
    let recovered = recover_secret(&shares).expect("recover_secret");
    assert_eq!(recovered, sec);
}

#[test]
fn threshold_of_one_shares_the_secret_itself() {
    let sec = SecretKey::random();
    let msk = MasterSecretKey::generate(&sec, 1).expect("msk");
    let share = msk.derive_share(&ID::from(17)).expect("share");
    assert_eq!(share, sec);
    assert_eq!(recover_secret(&[(ID::from(17), share)]).expect("recover"), sec);
}

#[test]
fn deal_gives_any_t_of_n() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let sec = SecretKey::random_from_rng(&mut rng);
    let params = Params { n: 7, t: 4 };
    let (mpk, shares) = deal_from_rng(&sec, params, &mut rng).expect("deal");
    assert_eq!(shares.len(), 7);
    assert_eq!(mpk.threshold(), 4);
    assert_eq!(mpk.public_key(), &sec.public_key());

    let picked: Vec<(ID, SecretKey)> = shares.iter().rev().take(4).copied().collect();
    assert_eq!(recover_secret(&picked).expect("recover"), sec);

    let m = b"committee vote";
    let sig_shares: Vec<(ID, Signature)> = shares[1..5]
        .iter()
        .map(|(id, sk)| (*id, sk.sign(m)))
        .collect();
    for (id, sig) in sig_shares.iter() {
        let pk_i = mpk.derive_public_share(id).expect("public share");
        assert!(sig.verify(&pk_i, m));
    }
    let sig = recover_signature(&sig_shares).expect("recover_signature");
    assert!(sig.verify(mpk.public_key(), m));
}

#[test]
fn deal_rejects_bad_params() {
    let sec = SecretKey::random();
    for params in [
        Params { n: 0, t: 0 },
        Params { n: 3, t: 0 },
        Params { n: 3, t: 4 },
    ] {
        let res = bls_threshold::deal(&sec, params);
        assert!(matches!(res, Err(Error::InvalidParams)), "{params:?}");
    }
}

#[test]
fn zero_threshold_rejected() {
    let sec = SecretKey::random();
    assert!(matches!(
        MasterSecretKey::generate(&sec, 0),
        Err(Error::InvalidParams)
    ));
    assert!(matches!(
        MasterSecretKey::from_coefficients(Vec::new()),
        Err(Error::EmptyInput)
    ));
}

#[test]
fn zero_id_share_refused() {
    let sec = SecretKey::random();
    let msk = MasterSecretKey::generate(&sec, 2).expect("msk");
    let zero = ID::from(0);
    assert!(zero.is_zero());
    assert!(matches!(msk.derive_share(&zero), Err(Error::InvalidInput)));
    assert!(matches!(
        msk.public_key().derive_public_share(&zero),
        Err(Error::InvalidInput)
    ));
}

#[test]
fn duplicate_ids_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(10);
    let sec = SecretKey::random_from_rng(&mut rng);
    let msk = MasterSecretKey::generate_from_rng(&sec, 2, &mut rng).expect("msk");

    let ids = [ID::from(1), ID::from(2), ID::from(1)];
    assert!(matches!(msk.derive_shares(&ids), Err(Error::DuplicateShareId)));

    let s1 = msk.derive_share(&ID::from(1)).expect("share");
    let s2 = msk.derive_share(&ID::from(2)).expect("share");
    let res = recover_secret(&[(ID::from(1), s1), (ID::from(2), s2), (ID::from(1), s1)]);
    assert!(matches!(res, Err(Error::DuplicateShareId)));

    let sig = s1.sign(b"m");
    let res = recover_signature(&[(ID::from(5), sig), (ID::from(5), sig)]);
    assert!(matches!(res, Err(Error::DuplicateShareId)));
}

#[test]
fn recovery_from_nothing_is_an_error() {
    assert!(matches!(recover_secret(&[]), Err(Error::EmptyInput)));
    assert!(matches!(recover_public_key(&[]), Err(Error::EmptyInput)));
    assert!(matches!(recover_signature(&[]), Err(Error::EmptyInput)));
}

#[test]
fn batch_derivation_matches_single_shares() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let sec = SecretKey::random_from_rng(&mut rng);
    let msk = MasterSecretKey::generate_from_rng(&sec, 5, &mut rng).expect("msk");
    let mpk = msk.public_key();
    let ids: Vec<ID> = [3u64, 5, 193, 22, 15, 1000].into_iter().map(ID::from).collect();

    let shares = msk.derive_shares(&ids).expect("derive_shares");
    assert_eq!(shares.len(), ids.len());
    for ((id, share), expected_id) in shares.iter().zip(ids.iter()) {
        assert_eq!(id, expected_id);
        assert_eq!(share, &msk.derive_share(id).expect("derive_share"));
        assert_eq!(share.public_key(), mpk.derive_public_share(id).expect("public share"));
    }

    let with_zero = [ID::from(4), ID::from(0)];
    assert!(matches!(msk.derive_shares(&with_zero), Err(Error::InvalidInput)));
}
