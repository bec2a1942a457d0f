//! BLS value types: identifiers, keys and signatures.
//!
//! Signatures live in G1 and public keys in G2. A signature on `m` under
//! secret `s` is `s * H(m)`, checked with `e(sig, g2) == e(H(m), pub)`.

use std::fmt;

use blstrs::{G1Projective, G2Projective, Scalar};
use ff::Field;
use group::Group;
use rand_core::{CryptoRng, OsRng, RngCore};

use crate::bls::{
    FR_SIZE, Fr, G1, G1_SIZE, G2, G2_SIZE, g1_from_bytes, g1_to_bytes, g2_from_bytes, g2_to_bytes,
    hash_to_g1, pairing_product_is_identity, scalar_from_be_bytes, scalar_from_bytes,
    scalar_random, scalar_to_be_bytes, scalar_to_bytes,
};
use crate::encoding::{be_bytes_to_decimal, decimal_to_be_bytes};
use crate::types::Error;

/// Tag for hashing arbitrary messages to G1.
pub const DST_MESSAGE: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";
/// Tag for mapping caller-supplied digests to G1.
pub const DST_HASH: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_HASH_";
/// Tag for proofs of possession over a compressed public key.
pub const DST_POP: &[u8] = b"BLS_POP_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// Evaluation point identifying a shareholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ID {
    v: Fr,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SecretKey {
    v: Fr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    v: G2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    v: G1,
}

fn scalar_from_le_slice(bytes: &[u8]) -> Result<Fr, Error> {
    if bytes.is_empty() || bytes.len() > FR_SIZE {
        return Err(Error::InvalidEncoding);
    }
    let mut raw = [0u8; FR_SIZE];
    raw[..bytes.len()].copy_from_slice(bytes);
    scalar_from_bytes(&raw)
}

fn scalar_from_dec_string(s: &str) -> Result<Fr, Error> {
    scalar_from_be_bytes(&decimal_to_be_bytes(s)?)
}

fn scalar_to_dec_string(v: &Fr) -> String {
    be_bytes_to_decimal(&scalar_to_be_bytes(v))
}

impl ID {
    pub const SIZE: usize = FR_SIZE;

    /// Build an ID from 1 to 32 little-endian bytes; short input is
    /// zero-extended. Use [`ID::deserialize`] for canonical 32-byte input.
    pub fn from_le_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            v: scalar_from_le_slice(bytes)?,
        })
    }

    pub fn serialize(&self) -> [u8; FR_SIZE] {
        scalar_to_bytes(&self.v)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            v: scalar_from_bytes(bytes)?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        Self::deserialize(&hex::decode(s)?)
    }

    pub fn to_dec_string(&self) -> String {
        scalar_to_dec_string(&self.v)
    }

    pub fn from_dec_string(s: &str) -> Result<Self, Error> {
        Ok(Self {
            v: scalar_from_dec_string(s)?,
        })
    }

    pub fn is_zero(&self) -> bool {
        bool::from(self.v.is_zero())
    }

    pub(crate) fn as_scalar(&self) -> &Fr {
        &self.v
    }
}

impl From<u64> for ID {
    fn from(v: u64) -> Self {
        Self { v: Scalar::from(v) }
    }
}

impl SecretKey {
    pub const SIZE: usize = FR_SIZE;

    /// Fresh key from the operating system CSPRNG.
    pub fn random() -> Self {
        Self::random_from_rng(&mut OsRng)
    }

    pub fn random_from_rng<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = scalar_random(rng);
            if !bool::from(v.is_zero()) {
                return Self { v };
            }
        }
    }

    /// Key from 1 to 32 little-endian bytes, zero-extended.
    /// [`SecretKey::deserialize`] takes exactly 32.
    pub fn from_le_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            v: scalar_from_le_slice(bytes)?,
        })
    }

    pub fn serialize(&self) -> [u8; FR_SIZE] {
        scalar_to_bytes(&self.v)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            v: scalar_from_bytes(bytes)?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        Self::deserialize(&hex::decode(s)?)
    }

    pub fn to_dec_string(&self) -> String {
        scalar_to_dec_string(&self.v)
    }

    pub fn from_dec_string(s: &str) -> Result<Self, Error> {
        Ok(Self {
            v: scalar_from_dec_string(s)?,
        })
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            v: G2Projective::generator() * self.v,
        }
    }

    /// Adds `rhs` into this key; the result signs for the summed public key.
    pub fn add_assign(&mut self, rhs: &SecretKey) {
        self.v += rhs.v;
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature {
            v: hash_to_g1(message, DST_MESSAGE) * self.v,
        }
    }

    /// Sign a digest the caller already computed.
    ///
    /// An empty digest, or one that maps to the identity, is rejected.
    pub fn sign_hash(&self, hash: &[u8]) -> Result<Signature, Error> {
        let h = digest_to_g1(hash)?;
        Ok(Signature { v: h * self.v })
    }

    /// Proof of possession: a signature over this key's compressed public key.
    pub fn proof_of_possession(&self) -> Signature {
        let pub_bytes = self.public_key().serialize();
        Signature {
            v: hash_to_g1(&pub_bytes, DST_POP) * self.v,
        }
    }

    /// Non-interactive Diffie-Hellman: `self * peer`.
    pub fn dh_key_exchange(&self, peer: &PublicKey) -> PublicKey {
        PublicKey {
            v: peer.v * self.v,
        }
    }

    pub(crate) fn from_scalar(v: Fr) -> Self {
        Self { v }
    }

    pub(crate) fn as_scalar(&self) -> &Fr {
        &self.v
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl PublicKey {
    pub const SIZE: usize = G2_SIZE;

    pub fn serialize(&self) -> [u8; G2_SIZE] {
        g2_to_bytes(&self.v)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            v: g2_from_bytes(bytes)?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        Self::deserialize(&hex::decode(s)?)
    }

    pub fn add_assign(&mut self, rhs: &PublicKey) {
        self.v += rhs.v;
    }

    pub fn is_identity(&self) -> bool {
        bool::from(self.v.is_identity())
    }

    pub(crate) fn from_point(v: G2) -> Self {
        Self { v }
    }

    pub(crate) fn as_point(&self) -> &G2 {
        &self.v
    }
}

impl Signature {
    pub const SIZE: usize = G1_SIZE;

    pub fn serialize(&self) -> [u8; G1_SIZE] {
        g1_to_bytes(&self.v)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            v: g1_from_bytes(bytes)?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    pub fn from_hex(s: &str) -> Result<Self, Error> {
        Self::deserialize(&hex::decode(s)?)
    }

    pub fn add_assign(&mut self, rhs: &Signature) {
        self.v += rhs.v;
    }

    pub fn verify(&self, public_key: &PublicKey, message: &[u8]) -> bool {
        self.verify_point(public_key, hash_to_g1(message, DST_MESSAGE))
    }

    /// Counterpart of [`SecretKey::sign_hash`]. Malformed digests fail.
    pub fn verify_hash(&self, public_key: &PublicKey, hash: &[u8]) -> bool {
        match digest_to_g1(hash) {
            Ok(h) => self.verify_point(public_key, h),
            Err(_) => false,
        }
    }

    pub fn verify_pop(&self, public_key: &PublicKey) -> bool {
        let pub_bytes = public_key.serialize();
        self.verify_point(public_key, hash_to_g1(&pub_bytes, DST_POP))
    }

    fn verify_point(&self, public_key: &PublicKey, h: G1) -> bool {
        if public_key.is_identity() {
            return false;
        }
        // e(sig, -g2) * e(H, pub) == 1
        pairing_product_is_identity(&[(self.v, -G2Projective::generator()), (h, public_key.v)])
    }

    pub(crate) fn from_point(v: G1) -> Self {
        Self { v }
    }

    pub(crate) fn as_point(&self) -> &G1 {
        &self.v
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self {
            v: G1Projective::identity(),
        }
    }
}

impl Default for PublicKey {
    fn default() -> Self {
        Self {
            v: G2Projective::identity(),
        }
    }
}

pub(crate) fn digest_to_g1(hash: &[u8]) -> Result<G1, Error> {
    if hash.is_empty() {
        return Err(Error::InvalidInput);
    }
    let h = hash_to_g1(hash, DST_HASH);
    if bool::from(h.is_identity()) {
        return Err(Error::InvalidInput);
    }
    Ok(h)
}

/// `DHKeyExchange(sk, peer)`, symmetric in the two key pairs.
pub fn dh_key_exchange(sk: &SecretKey, peer: &PublicKey) -> PublicKey {
    sk.dh_key_exchange(peer)
}
