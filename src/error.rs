// In: src/error.rs

//! This module defines the error types for the entire cloak library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! There are exactly two public error types:
//! * `StorageError` is what a `ResourceStore` reports. It knows nothing about layers.
//! * `PipelineError` is what every `DataSource` (base source, layer, pipeline) reports.
//!   Storage failures travel through it untouched via the `Storage` variant.

use thiserror::Error;

//==================================================================================
// 1. Storage Errors (raised by the external Resource Store)
//==================================================================================

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Resource '{resource}' does not exist")]
    NotFound { resource: String },

    #[error("Invalid resource name '{resource}': {reason}")]
    InvalidName { resource: String, reason: String },

    /// An error originating from the underlying I/O subsystem (e.g., permission denied).
    #[error("I/O error on resource '{resource}': {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The store cannot service requests at all (e.g., a poisoned lock).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

//==================================================================================
// 2. Pipeline Errors (raised by sources, layers and assembly)
//==================================================================================

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A failure from the Resource Store, propagated unchanged through every layer.
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    /// An invalid construction-time parameter, e.g. an out-of-range compression level.
    #[error("Invalid pipeline configuration: {0}")]
    Config(String),

    /// A decode step could not invert its encoding: bad framing, corrupt stream, etc.
    #[error("Decode failed in '{layer}' step: {reason}")]
    Decode { layer: &'static str, reason: String },

    /// An encode step failed locally. Only the deflate engine can report this.
    #[error("Encode failed in '{layer}' step: {reason}")]
    Encode { layer: &'static str, reason: String },
}

impl PipelineError {
    pub(crate) fn decode(layer: &'static str, reason: impl Into<String>) -> Self {
        PipelineError::Decode {
            layer,
            reason: reason.into(),
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, PipelineError::Decode { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, PipelineError::Storage(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, PipelineError::Config(_))
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Config(err.to_string())
    }
}
