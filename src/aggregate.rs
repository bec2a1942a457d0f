//! Signature and public-key aggregation, and batch verification of
//! aggregated signatures over distinct digests.

use blstrs::G2Projective;
use group::Group;

use crate::bls::{G1, G2, pairing_product_is_identity};
use crate::keys::{PublicKey, Signature, digest_to_g1};
use crate::types::Error;

pub fn aggregate_signatures(sigs: &[Signature]) -> Result<Signature, Error> {
    let (first, rest) = sigs.split_first().ok_or(Error::EmptyInput)?;
    let mut acc = *first;
    for sig in rest {
        acc.add_assign(sig);
    }
    Ok(acc)
}

pub fn aggregate_public_keys(keys: &[PublicKey]) -> Result<PublicKey, Error> {
    let (first, rest) = keys.split_first().ok_or(Error::EmptyInput)?;
    let mut acc = *first;
    for key in rest {
        acc.add_assign(key);
    }
    Ok(acc)
}

impl Signature {
    /// Verify an aggregate of `n` signatures where signer `i` signed
    /// `hashes[i]` (via [`crate::SecretKey::sign_hash`]) under `public_keys[i]`:
    ///
    /// `e(agg, g2) == prod_i e(H(hashes[i]), public_keys[i])`
    ///
    /// Inconsistent lengths return false. Repeated digests are not detected;
    /// rejecting them is up to the caller.
    pub fn verify_aggregated_hashes<H: AsRef<[u8]>>(
        &self,
        public_keys: &[PublicKey],
        hashes: &[H],
        hash_size: usize,
        n: usize,
    ) -> bool {
        if n == 0 || hash_size == 0 || public_keys.len() != n || hashes.len() != n {
            tracing::debug!(
                n,
                hash_size,
                keys = public_keys.len(),
                hashes = hashes.len(),
                "aggregate verification input rejected"
            );
            return false;
        }

        let mut pairs: Vec<(G1, G2)> = Vec::with_capacity(n + 1);
        pairs.push((*self.as_point(), -G2Projective::generator()));
        for (i, (public_key, hash)) in public_keys.iter().zip(hashes.iter()).enumerate() {
            let hash = hash.as_ref();
            if hash.len() != hash_size {
                tracing::debug!(index = i, len = hash.len(), hash_size, "digest has wrong size");
                return false;
            }
            if public_key.is_identity() {
                tracing::debug!(index = i, "identity public key in aggregate");
                return false;
            }
            let h = match digest_to_g1(hash) {
                Ok(h) => h,
                Err(_) => return false,
            };
            pairs.push((h, *public_key.as_point()));
        }
        pairing_product_is_identity(&pairs)
    }
}
