//! This module contains the pure, stateless kernels for the text-safe framing
//! shared by every transform: standard radix-64 (base64) with canonical `=` padding.
//!
//! Framing is always the last step of a transform's encode and the first step of
//! its decode, so whatever a transform persists is plain ASCII.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::PipelineError;

/// Encodes arbitrary bytes as padded base64 ASCII.
pub fn encode(input_bytes: &[u8]) -> Vec<u8> {
    STANDARD.encode(input_bytes).into_bytes()
}

/// Decodes padded base64 ASCII back into bytes.
///
/// The standard engine rejects characters outside the alphabet, missing or
/// excess padding, and non-zero trailing bits, so any of those surfaces as a
/// `Decode` error instead of silently producing different bytes.
pub fn decode(input_bytes: &[u8]) -> Result<Vec<u8>, PipelineError> {
    STANDARD
        .decode(input_bytes)
        .map_err(|e| PipelineError::decode("framing", e.to_string()))
}
