//! Reversible additive byte substitution.
//!
//! Every byte is moved one step up the 0..=255 ring on encode and one step down
//! on decode. This is obfuscation, not confidentiality: there is no key.

/// Distance each byte is moved around the ring.
const SHIFT: u8 = 1;

pub fn encode(input_bytes: &[u8]) -> Vec<u8> {
    input_bytes.iter().map(|b| b.wrapping_add(SHIFT)).collect()
}

pub fn decode(input_bytes: &[u8]) -> Vec<u8> {
    input_bytes.iter().map(|b| b.wrapping_sub(SHIFT)).collect()
}
