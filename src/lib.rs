//! BLS signatures on BLS12-381 with threshold key sharing.
//!
//! - [`SecretKey`] signs into G1, [`PublicKey`] lives in G2.
//! - Signatures and public keys aggregate by group addition, and
//!   [`Signature::verify_aggregated_hashes`] checks an aggregate over many
//!   digests with a single multi-pairing.
//! - [`MasterSecretKey`] turns a key into a degree `k - 1` polynomial; shares
//!   are evaluations at [`ID`]s, and any `k` of them recover the key, the
//!   public key, or a signature through Lagrange interpolation at zero.
//! - Proofs of possession guard aggregation against rogue keys, and
//!   [`dh_key_exchange`] derives a shared G2 point from two key pairs.
//!
//! Call [`init`] once at startup, before other threads use the library.
//! Everything else is pure and safe to call concurrently.
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod bls;
pub mod encoding;
pub mod keys;
pub mod lagrange;
pub mod logging;
pub mod threshold;
pub mod types;
mod wire_impls;

pub use crate::aggregate::{aggregate_public_keys, aggregate_signatures};
pub use crate::bls::{Curve, init, selected_curve};
pub use crate::keys::{ID, PublicKey, SecretKey, Signature, dh_key_exchange};
pub use crate::threshold::{
    MasterPublicKey, MasterSecretKey, deal, deal_from_rng, recover_public_key, recover_secret,
    recover_signature,
};
pub use crate::types::{Error, Params, Wire, validate_params};
