//! This module is the public API for the library's stateless encode/decode kernels.
//!
//! Every kernel is a pure function over byte slices. Kernels own no configuration
//! beyond their arguments and know nothing about sources, layers or stores; the
//! `transform` module chains them into complete layer codecs.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// zlib-wrapped deflate compression.
pub mod deflate;

/// Radix-64 text-safe framing.
pub mod framing;

/// Additive byte substitution.
pub mod shift;
