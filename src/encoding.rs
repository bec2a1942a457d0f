//! Length prefixes and decimal string conversion for 256-bit values.

use crate::types::Error;

pub fn enc_len(len: usize) -> Result<[u8; 4], Error> {
    // Lengths are encoded as 4-byte big-endian.
    if len > u32::MAX as usize {
        return Err(Error::InvalidEncoding);
    }
    Ok((len as u32).to_be_bytes())
}

pub fn dec_len(input: &[u8]) -> Result<(usize, &[u8]), Error> {
    if input.len() < 4 {
        return Err(Error::InvalidEncoding);
    }
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&input[0..4]);
    Ok((u32::from_be_bytes(len_bytes) as usize, &input[4..]))
}

/// Parse an unsigned decimal string into 32 big-endian bytes.
///
/// Rejects empty strings, signs, whitespace and anything that does not fit
/// in 256 bits. Range checks against a field modulus are left to the caller.
pub fn decimal_to_be_bytes(s: &str) -> Result<[u8; 32], Error> {
    if s.is_empty() {
        return Err(Error::InvalidEncoding);
    }
    // Least significant limb first.
    let mut limbs = [0u64; 4];
    for c in s.bytes() {
        if !c.is_ascii_digit() {
            return Err(Error::InvalidEncoding);
        }
        let mut carry = (c - b'0') as u128;
        for limb in limbs.iter_mut() {
            let v = (*limb as u128) * 10 + carry;
            *limb = v as u64;
            carry = v >> 64;
        }
        if carry != 0 {
            return Err(Error::InvalidEncoding);
        }
    }
    let mut out = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        out[(3 - i) * 8..(4 - i) * 8].copy_from_slice(&limb.to_be_bytes());
    }
    Ok(out)
}

pub fn be_bytes_to_decimal(bytes: &[u8; 32]) -> String {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let mut chunk = [0u8; 8];
        chunk.copy_from_slice(&bytes[(3 - i) * 8..(4 - i) * 8]);
        *limb = u64::from_be_bytes(chunk);
    }
    if limbs == [0u64; 4] {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(78);
    while limbs != [0u64; 4] {
        let mut rem = 0u128;
        for limb in limbs.iter_mut().rev() {
            let cur = (rem << 64) | (*limb as u128);
            *limb = (cur / 10) as u64;
            rem = cur % 10;
        }
        digits.push(b'0' + rem as u8);
    }
    digits.iter().rev().map(|d| *d as char).collect()
}
