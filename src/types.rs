//! Common types and error handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bls::Curve;

pub trait Wire: Sized {
    // Canonical byte encoding for transport between parties.
    fn encode(&self) -> Vec<u8>;
    fn decode(bytes: &[u8]) -> Result<Self, Error>;
}

/// Threshold parameters: `t` of `n` shareholders recover the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub n: u32,
    pub t: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid encoding")]
    InvalidEncoding,
    #[error("point is not on the curve")]
    PointNotOnCurve,
    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,
    #[error("duplicate share id")]
    DuplicateShareId,
    #[error("empty input")]
    EmptyInput,
    #[error("size mismatch: expected {expected}, got {got}")]
    SizeMismatch { expected: usize, got: usize },
    #[error("invalid input")]
    InvalidInput,
    #[error("invalid threshold parameters")]
    InvalidParams,
    #[error("pairing context already initialized for {0:?}")]
    AlreadyInitialized(Curve),
}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Self {
        Error::InvalidEncoding
    }
}

pub fn validate_params(params: Params) -> Result<(), Error> {
    // Non-zero, and threshold not exceeding the number of shareholders.
    if params.n == 0 || params.t == 0 || params.t > params.n {
        return Err(Error::InvalidParams);
    }
    Ok(())
}
