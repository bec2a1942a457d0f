//! Threshold key generation, share derivation and recovery.
//!
//! A master secret key of length `k` holds the coefficients of
//! `P(x) = s + c_1 x + ... + c_{k-1} x^{k-1}`, where `s` is the original
//! secret. Any `k` shares `P(id)` with distinct ids recover `s`. The same
//! holds pointwise for the master public key and for signatures made with
//! the shares.

use std::collections::HashSet;
use std::fmt;

use rand_core::{CryptoRng, OsRng, RngCore};

use crate::bls::{Fr, G1, G2};
use crate::keys::{ID, PublicKey, SecretKey, Signature};
use crate::lagrange::{evaluate_polynomial, interpolate_at_zero};
use crate::types::{Error, Params, validate_params};

#[derive(Clone)]
pub struct MasterSecretKey {
    coeffs: Vec<SecretKey>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterPublicKey {
    coeffs: Vec<PublicKey>,
}

impl MasterSecretKey {
    /// Polynomial with `sec` as constant term and `k - 1` fresh random
    /// coefficients from the OS CSPRNG.
    pub fn generate(sec: &SecretKey, k: usize) -> Result<Self, Error> {
        Self::generate_from_rng(sec, k, &mut OsRng)
    }

    pub fn generate_from_rng<R: RngCore + CryptoRng + ?Sized>(
        sec: &SecretKey,
        k: usize,
        rng: &mut R,
    ) -> Result<Self, Error> {
        if k == 0 {
            return Err(Error::InvalidParams);
        }
        let mut coeffs = Vec::with_capacity(k);
        coeffs.push(*sec);
        for _ in 1..k {
            coeffs.push(SecretKey::random_from_rng(rng));
        }
        tracing::debug!(threshold = k, "master secret key generated");
        Ok(Self { coeffs })
    }

    pub fn from_coefficients(coeffs: Vec<SecretKey>) -> Result<Self, Error> {
        if coeffs.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { coeffs })
    }

    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coefficients(&self) -> &[SecretKey] {
        &self.coeffs
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.coeffs[0]
    }

    pub fn public_key(&self) -> MasterPublicKey {
        MasterPublicKey {
            coeffs: self.coeffs.iter().map(SecretKey::public_key).collect(),
        }
    }

    /// Share for `id`: `P(id)`. The zero id is refused since `P(0)` is the
    /// secret itself.
    pub fn derive_share(&self, id: &ID) -> Result<SecretKey, Error> {
        share_at(&self.scalars(), id)
    }

    pub fn derive_shares(&self, ids: &[ID]) -> Result<Vec<(ID, SecretKey)>, Error> {
        ensure_distinct(ids)?;
        let coeffs = self.scalars();
        ids.iter()
            .map(|id| Ok((*id, share_at(&coeffs, id)?)))
            .collect()
    }

    fn scalars(&self) -> Vec<Fr> {
        self.coeffs.iter().map(|c| *c.as_scalar()).collect()
    }
}

impl fmt::Debug for MasterSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSecretKey")
            .field("threshold", &self.coeffs.len())
            .finish_non_exhaustive()
    }
}

impl MasterPublicKey {
    pub fn from_coefficients(coeffs: Vec<PublicKey>) -> Result<Self, Error> {
        if coeffs.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(Self { coeffs })
    }

    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coefficients(&self) -> &[PublicKey] {
        &self.coeffs
    }

    /// Public key of the shared secret.
    pub fn public_key(&self) -> &PublicKey {
        &self.coeffs[0]
    }

    /// Public key matching the share for `id`, computable without secrets.
    pub fn derive_public_share(&self, id: &ID) -> Result<PublicKey, Error> {
        if id.is_zero() {
            return Err(Error::InvalidInput);
        }
        let coeffs: Vec<G2> = self.coeffs.iter().map(|c| *c.as_point()).collect();
        Ok(PublicKey::from_point(evaluate_polynomial(
            &coeffs,
            id.as_scalar(),
        )?))
    }
}

fn share_at(coeffs: &[Fr], id: &ID) -> Result<SecretKey, Error> {
    if id.is_zero() {
        return Err(Error::InvalidInput);
    }
    Ok(SecretKey::from_scalar(evaluate_polynomial(
        coeffs,
        id.as_scalar(),
    )?))
}

fn ensure_distinct(ids: &[ID]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.serialize()) {
            return Err(Error::DuplicateShareId);
        }
    }
    Ok(())
}

fn share_points<T>(shares: &[(ID, T)]) -> Vec<Fr> {
    shares.iter().map(|(id, _)| *id.as_scalar()).collect()
}

pub fn recover_secret(shares: &[(ID, SecretKey)]) -> Result<SecretKey, Error> {
    tracing::debug!(shares = shares.len(), "recovering secret key");
    let ys: Vec<Fr> = shares.iter().map(|(_, sk)| *sk.as_scalar()).collect();
    let v = interpolate_at_zero(&share_points(shares), &ys)?;
    Ok(SecretKey::from_scalar(v))
}

pub fn recover_public_key(shares: &[(ID, PublicKey)]) -> Result<PublicKey, Error> {
    tracing::debug!(shares = shares.len(), "recovering public key");
    let ys: Vec<G2> = shares.iter().map(|(_, pk)| *pk.as_point()).collect();
    let v = interpolate_at_zero(&share_points(shares), &ys)?;
    Ok(PublicKey::from_point(v))
}

pub fn recover_signature(shares: &[(ID, Signature)]) -> Result<Signature, Error> {
    tracing::debug!(shares = shares.len(), "recovering signature");
    let ys: Vec<G1> = shares.iter().map(|(_, sig)| *sig.as_point()).collect();
    let v = interpolate_at_zero(&share_points(shares), &ys)?;
    Ok(Signature::from_point(v))
}

/// Split `sec` into `params.n` shares at ids `1..=n`, any `params.t` of
/// which recover it.
pub fn deal(
    sec: &SecretKey,
    params: Params,
) -> Result<(MasterPublicKey, Vec<(ID, SecretKey)>), Error> {
    deal_from_rng(sec, params, &mut OsRng)
}

pub fn deal_from_rng<R: RngCore + CryptoRng + ?Sized>(
    sec: &SecretKey,
    params: Params,
    rng: &mut R,
) -> Result<(MasterPublicKey, Vec<(ID, SecretKey)>), Error> {
    validate_params(params)?;
    let msk = MasterSecretKey::generate_from_rng(sec, params.t as usize, rng)?;
    let ids: Vec<ID> = (1..=params.n).map(|i| ID::from(i as u64)).collect();
    let shares = msk.derive_shares(&ids)?;
    Ok((msk.public_key(), shares))
}
