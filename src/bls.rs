//! Thin capability layer over the BLS12-381 backend.
//!
//! Everything above this module talks to `blstrs` only through these
//! functions: hashing to G1, pairings, and checked (de)serialization of
//! scalars and points.

use std::sync::OnceLock;

use blstrs::{Bls12, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt, Scalar};
use ff::Field;
use group::{Curve as _, Group};
use pairing::{MillerLoopResult, MultiMillerLoop};
use serde::{Deserialize, Serialize};

use crate::types::Error;

pub type Fr = Scalar;
pub type G1 = G1Projective;
pub type G2 = G2Projective;
pub type Target = Gt;

pub const FR_SIZE: usize = 32;
pub const G1_SIZE: usize = 48;
pub const G2_SIZE: usize = 96;

/// Named pairing-friendly parameter sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Curve {
    Bls12381,
}

impl Curve {
    /// Order r of G1, G2 and GT, in decimal.
    pub fn order(&self) -> &'static str {
        match self {
            Curve::Bls12381 => {
                "52435875175126190479447740508185965837690552500527637822603658699938581184513"
            }
        }
    }

    /// Modulus p of the base field, in decimal.
    pub fn field_order(&self) -> &'static str {
        match self {
            Curve::Bls12381 => concat!(
                "40024095552216673934177898257359041565568828199390078853320581361",
                "24031650490837864442687629129015664037894272559787"
            ),
        }
    }
}

static SELECTED: OnceLock<Curve> = OnceLock::new();

/// Select the curve for this process.
///
/// Call once at startup, before spawning threads that use the library.
/// Re-initializing with the same curve is a no-op; switching curves after
/// selection is refused with [`Error::AlreadyInitialized`].
pub fn init(curve: Curve) -> Result<(), Error> {
    let selected = *SELECTED.get_or_init(|| curve);
    if selected != curve {
        return Err(Error::AlreadyInitialized(selected));
    }
    tracing::debug!(?curve, "pairing context initialized");
    Ok(())
}

pub fn selected_curve() -> Option<Curve> {
    SELECTED.get().copied()
}

pub fn hash_to_g1(msg: &[u8], dst: &[u8]) -> G1 {
    G1Projective::hash_to_curve(msg, dst, &[])
}

pub fn pairing(g1: &G1, g2: &G2) -> Target {
    blstrs::pairing(&g1.to_affine(), &g2.to_affine())
}

/// Returns true when `prod_i e(p_i, q_i) == 1`, using one shared final
/// exponentiation.
pub fn pairing_product_is_identity(pairs: &[(G1, G2)]) -> bool {
    let prepared: Vec<(G1Affine, G2Prepared)> = pairs
        .iter()
        .map(|(p, q)| (p.to_affine(), G2Prepared::from(q.to_affine())))
        .collect();
    let terms: Vec<(&G1Affine, &G2Prepared)> = prepared.iter().map(|(p, q)| (p, q)).collect();
    Bls12::multi_miller_loop(&terms).final_exponentiation() == Gt::identity()
}

pub fn scalar_random<R: rand_core::RngCore + ?Sized>(rng: &mut R) -> Fr {
    Fr::random(rng)
}

pub fn scalar_to_bytes(s: &Fr) -> [u8; FR_SIZE] {
    s.to_bytes_le()
}

pub fn scalar_from_bytes(bytes: &[u8]) -> Result<Fr, Error> {
    let raw: [u8; FR_SIZE] = bytes.try_into().map_err(|_| Error::InvalidEncoding)?;
    Option::<Fr>::from(Fr::from_bytes_le(&raw)).ok_or(Error::InvalidEncoding)
}

pub fn scalar_to_be_bytes(s: &Fr) -> [u8; FR_SIZE] {
    s.to_bytes_be()
}

pub fn scalar_from_be_bytes(bytes: &[u8; FR_SIZE]) -> Result<Fr, Error> {
    Option::<Fr>::from(Fr::from_bytes_be(bytes)).ok_or(Error::InvalidEncoding)
}

pub fn g1_to_bytes(p: &G1) -> [u8; G1_SIZE] {
    p.to_affine().to_compressed()
}

pub fn g1_from_bytes(bytes: &[u8]) -> Result<G1, Error> {
    let raw: [u8; G1_SIZE] = bytes.try_into().map_err(|_| Error::InvalidEncoding)?;
    let affine = Option::<G1Affine>::from(G1Affine::from_compressed_unchecked(&raw))
        .ok_or(Error::PointNotOnCurve)?;
    if !bool::from(affine.is_on_curve()) {
        return Err(Error::PointNotOnCurve);
    }
    if !bool::from(affine.is_torsion_free()) {
        return Err(Error::NotInSubgroup);
    }
    Ok(affine.into())
}

pub fn g2_to_bytes(p: &G2) -> [u8; G2_SIZE] {
    p.to_affine().to_compressed()
}

pub fn g2_from_bytes(bytes: &[u8]) -> Result<G2, Error> {
    let raw: [u8; G2_SIZE] = bytes.try_into().map_err(|_| Error::InvalidEncoding)?;
    let affine = Option::<G2Affine>::from(G2Affine::from_compressed_unchecked(&raw))
        .ok_or(Error::PointNotOnCurve)?;
    if !bool::from(affine.is_on_curve()) {
        return Err(Error::PointNotOnCurve);
    }
    if !bool::from(affine.is_torsion_free()) {
        return Err(Error::NotInSubgroup);
    }
    Ok(affine.into())
}
