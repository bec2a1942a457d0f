use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bls::G2_SIZE;
use crate::encoding::{dec_len, enc_len};
use crate::keys::{ID, PublicKey, SecretKey, Signature};
use crate::threshold::MasterPublicKey;
use crate::types::{Error, Params, Wire};

// Fixed-size values travel as their canonical serialization, and as hex
// strings through serde.
macro_rules! canonical_encodings {
    ($($ty:ty),*) => {$(
        impl Wire for $ty {
            fn encode(&self) -> Vec<u8> {
                self.serialize().to_vec()
            }

            fn decode(bytes: &[u8]) -> Result<Self, Error> {
                <$ty>::deserialize(bytes)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                <$ty>::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    )*};
}

canonical_encodings!(ID, SecretKey, PublicKey, Signature);

impl Wire for Params {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8);
        out.extend_from_slice(&self.n.to_be_bytes());
        out.extend_from_slice(&self.t.to_be_bytes());
        out
    }

    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 8 {
            return Err(Error::InvalidEncoding);
        }
        let mut n_bytes = [0u8; 4];
        let mut t_bytes = [0u8; 4];
        n_bytes.copy_from_slice(&bytes[0..4]);
        t_bytes.copy_from_slice(&bytes[4..8]);
        Ok(Params {
            n: u32::from_be_bytes(n_bytes),
            t: u32::from_be_bytes(t_bytes),
        })
    }
}

impl Wire for MasterPublicKey {
    fn encode(&self) -> Vec<u8> {
        let coeffs = self.coefficients();
        let mut out = Vec::with_capacity(4 + coeffs.len() * G2_SIZE);
        out.extend_from_slice(&enc_len(coeffs.len()).expect("length must fit u32"));
        for c in coeffs {
            out.extend_from_slice(&c.serialize());
        }
        out
    }

    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let (n, body) = dec_len(bytes)?;
        let expected = n.checked_mul(G2_SIZE).ok_or(Error::InvalidEncoding)?;
        if body.len() != expected {
            return Err(Error::InvalidEncoding);
        }
        let coeffs = body
            .chunks_exact(G2_SIZE)
            .map(PublicKey::deserialize)
            .collect::<Result<Vec<_>, _>>()?;
        MasterPublicKey::from_coefficients(coeffs)
    }
}
