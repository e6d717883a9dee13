// In: src/transform.rs

//! Defines the closed set of layer codecs a pipeline can be built from.
//!
//! A `Transform` is a pure `(encode, decode)` pair with the invariant
//! `decode(encode(b)) == b` for every byte sequence `b`. It owns nothing except
//! its own configuration, which is why it is `Copy`. The variants dispatch to
//! the stateless kernels; each one finishes its encode with the text-safe
//! framing and starts its decode by removing it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::kernels::{deflate, framing, shift};

//==================================================================================
// I. Compression Level
//==================================================================================

/// A deflate compression level, validated to `0..=9` at construction.
///
/// Out-of-range values are rejected, never clamped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// No compression: deflate stored blocks only.
    pub const NONE: CompressionLevel = CompressionLevel(deflate::MIN_LEVEL);
    /// Smallest output, slowest.
    pub const BEST: CompressionLevel = CompressionLevel(deflate::MAX_LEVEL);

    pub fn new(level: i64) -> Result<Self, PipelineError> {
        let lo = i64::from(deflate::MIN_LEVEL);
        let hi = i64::from(deflate::MAX_LEVEL);
        if !(lo..=hi).contains(&level) {
            return Err(PipelineError::Config(format!(
                "compression level {} is outside the supported range {}..={}",
                level, lo, hi
            )));
        }
        Ok(CompressionLevel(level as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel(6)
    }
}

impl TryFrom<i64> for CompressionLevel {
    type Error = PipelineError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        CompressionLevel::new(level)
    }
}

impl From<CompressionLevel> for i64 {
    fn from(level: CompressionLevel) -> Self {
        i64::from(level.0)
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//==================================================================================
// II. Transform Variants
//==================================================================================

/// One layer's codec.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "op", content = "params", rename_all = "snake_case")]
pub enum Transform {
    /// Deflate at `level`, then radix-64 framing.
    Compression {
        #[serde(default)]
        level: CompressionLevel,
    },
    /// `+1 mod 256` byte shift, then radix-64 framing.
    Obfuscation,
}

impl Transform {
    /// Builds a compression transform, rejecting levels outside `0..=9`.
    pub fn compression(level: i64) -> Result<Self, PipelineError> {
        Ok(Transform::Compression {
            level: CompressionLevel::new(level)?,
        })
    }

    pub fn obfuscation() -> Self {
        Transform::Obfuscation
    }

    /// Stable short label used in logs and layer listings.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Compression { .. } => "compression",
            Transform::Obfuscation => "obfuscation",
        }
    }

    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>, PipelineError> {
        match self {
            Transform::Compression { level } => {
                let compressed = deflate::encode(payload, level.get())?;
                Ok(framing::encode(&compressed))
            }
            Transform::Obfuscation => Ok(framing::encode(&shift::encode(payload))),
        }
    }

    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>, PipelineError> {
        match self {
            Transform::Compression { .. } => {
                let compressed = framing::decode(encoded)?;
                deflate::decode(&compressed)
            }
            Transform::Obfuscation => Ok(shift::decode(&framing::decode(encoded)?)),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Compression { level } => write!(f, "compression(level={})", level),
            Transform::Obfuscation => write!(f, "obfuscation"),
        }
    }
}
