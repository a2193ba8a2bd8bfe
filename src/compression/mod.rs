//! **Single-call** zlib compression façade over caller-owned buffers.

mod codec;
mod config;
mod errors;


pub use codec::{
    compress, compress_bound, compress_into, compress_into_with, decompress, decompress_into,
    decompress_into_partial, Decompressed,
};
pub use config::{CodecConfig, DEFAULT_LEVEL, DEFAULT_MAX_OUTPUT, MAX_LEVEL};
pub use errors::{CodecError, Result, StatusCode};

// ------------------------------------------------------------------
// Convenience shortcuts
// ------------------------------------------------------------------
/// Compress with **default** settings (level 6).
#[inline(always)]
pub fn compress_default(src: &[u8]) -> Result<Vec<u8>> {
    compress(src, &CodecConfig::default())
}

/// Decompress with **default** settings (64 MiB ceiling).
#[inline(always)]
pub fn decompress_default(src: &[u8]) -> Result<Vec<u8>> {
    decompress(src, &CodecConfig::default())
}
