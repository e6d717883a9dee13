//! This module contains the pure, stateless kernels for deflate compression and
//! decompression, wrapped in the zlib container (2-byte header, Adler-32 trailer).
//!
//! This module is a safe, panic-free wrapper around the `flate2` crate. The zlib
//! container is what gives the compression layer its corruption detection: a
//! change to the compressed blocks or the trailer fails the block decoder or the
//! Adler-32 checksum. The informational FLEVEL bits of the header are not
//! covered by the checksum, so a change confined to them is tolerated and still
//! inflates to the original payload.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::PipelineError;

/// Lowest accepted level (stored blocks, no compression).
pub const MIN_LEVEL: u32 = 0;
/// Highest accepted level.
pub const MAX_LEVEL: u32 = 9;

//==================================================================================
// 1. Public API
//==================================================================================

/// Deflate-compresses `input_bytes` at `level` into a complete zlib stream.
///
/// Empty input still yields a valid (8-byte) stream, never an empty buffer.
/// `level` must already be validated to `MIN_LEVEL..=MAX_LEVEL`.
pub fn encode(input_bytes: &[u8], level: u32) -> Result<Vec<u8>, PipelineError> {
    debug_assert!(level <= MAX_LEVEL);

    let output_buf = Vec::with_capacity(input_bytes.len() / 2 + 16);
    let mut encoder = ZlibEncoder::new(output_buf, Compression::new(level));
    encoder
        .write_all(input_bytes)
        .map_err(|e| PipelineError::Encode {
            layer: "deflate",
            reason: e.to_string(),
        })?;

    // `finish` is essential to flush the final block and the Adler-32 trailer.
    encoder.finish().map_err(|e| PipelineError::Encode {
        layer: "deflate",
        reason: e.to_string(),
    })
}

/// Inflates a complete zlib stream.
///
/// Fails on a bad header, invalid block data, checksum mismatch, a stream that
/// ends before its final block, or bytes left over after the stream end.
pub fn decode(input_bytes: &[u8]) -> Result<Vec<u8>, PipelineError> {
    let mut inflater = Decompress::new(true);
    let mut output_buf = Vec::with_capacity(input_bytes.len().saturating_mul(4).max(64));

    loop {
        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();

        let status = inflater
            .decompress_vec(&input_bytes[consumed..], &mut output_buf, FlushDecompress::None)
            .map_err(|e| PipelineError::decode("deflate", e.to_string()))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if output_buf.len() == output_buf.capacity() {
                    // Out of room, not out of input. Grow and resume.
                    output_buf.reserve(output_buf.capacity());
                } else if inflater.total_in() as usize == consumed
                    && inflater.total_out() == produced
                {
                    return Err(PipelineError::decode(
                        "deflate",
                        format!(
                            "stream truncated: input exhausted after {} bytes without a final block",
                            consumed
                        ),
                    ));
                }
            }
        }
    }

    let consumed = inflater.total_in() as usize;
    if consumed != input_bytes.len() {
        return Err(PipelineError::decode(
            "deflate",
            format!(
                "{} trailing bytes after end of stream",
                input_bytes.len() - consumed
            ),
        ));
    }

    Ok(output_buf)
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
