//! **Whole-buffer zlib codec** over `flate2`'s raw engine.
//! Caller supplies the destination slice; its length is the capacity.
//! Every call builds fresh engine state and drops it before returning.

use flate2::{Compress, Decompress, FlushCompress, FlushDecompress, Status};
use tracing::{debug, trace};

use super::config::CodecConfig;
use super::errors::{CodecError, Result};

/// Outcome of [`decompress_into_partial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decompressed {
    /// Bytes written into the destination.
    pub written: usize,
    /// Source bytes that made up the stream; anything after is ignored.
    pub consumed: usize,
}

// ------------------------------------------------------------------
// 1. Sizing
// ------------------------------------------------------------------
/// Worst-case compressed size for `source_len` input bytes at any level.
/// Follows miniz's `mz_compressBound`, which covers the deflate backend's
/// fast-level output on incompressible data.
#[inline(always)]
pub fn compress_bound(source_len: usize) -> usize {
    let expanded = source_len.saturating_mul(110) / 100;
    let stored_blocks = (source_len / (31 * 1024)).saturating_add(1).saturating_mul(5);
    let by_ratio = expanded.saturating_add(128);
    let by_blocks = source_len.saturating_add(stored_blocks).saturating_add(128);
    by_ratio.max(by_blocks)
}

// ------------------------------------------------------------------
// 2. Compress into caller buffer
// ------------------------------------------------------------------
/// Compress `src` into `dst` at the default level.
#[inline(always)]
pub fn compress_into(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    compress_into_with(src, dst, &CodecConfig::default())
}

/// Compress `src` into `dst` at `cfg.level`. Returns the compressed length.
pub fn compress_into_with(src: &[u8], dst: &mut [u8], cfg: &CodecConfig) -> Result<usize> {
    let level = cfg.compression()?;
    let mut engine = Compress::new(level, true);

    loop {
        let in_pos = engine.total_in() as usize;
        let out_pos = engine.total_out() as usize;
        let status = engine
            .compress(&src[in_pos..], &mut dst[out_pos..], FlushCompress::Finish)
            .map_err(|e| CodecError::invalid(format!("deflate engine failure: {e}")))?;

        let new_in = engine.total_in() as usize;
        let new_out = engine.total_out() as usize;
        trace!(status = ?status, consumed = new_in, written = new_out, "deflate step");

        match status {
            Status::StreamEnd => {
                debug!(
                    source_len = src.len(),
                    compressed_len = new_out,
                    level = cfg.level,
                    "compressed buffer"
                );
                return Ok(new_out);
            }
            Status::Ok | Status::BufError => {
                if new_out >= dst.len() {
                    debug!(source_len = src.len(), capacity = dst.len(), "compress: destination full");
                    return Err(CodecError::insufficient(dst.len()));
                }
                if new_in == in_pos && new_out == out_pos {
                    return Err(CodecError::invalid("deflate engine made no progress"));
                }
            }
        }
    }
}

// ------------------------------------------------------------------
// 3. Decompress into caller buffer
// ------------------------------------------------------------------
/// Decompress a zlib stream from `src` into `dst`. Returns the reconstructed length.
#[inline(always)]
pub fn decompress_into(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    decompress_into_partial(src, dst).map(|d| d.written)
}

/// Like [`decompress_into`], also reporting how much of `src` the stream occupied.
pub fn decompress_into_partial(src: &[u8], dst: &mut [u8]) -> Result<Decompressed> {
    let mut engine = Decompress::new(true);

    loop {
        let in_pos = engine.total_in() as usize;
        let out_pos = engine.total_out() as usize;
        let status = engine
            .decompress(&src[in_pos..], &mut dst[out_pos..], FlushDecompress::None)
            .map_err(|e| corrupt(src, e.to_string()))?;

        let new_in = engine.total_in() as usize;
        let new_out = engine.total_out() as usize;
        trace!(status = ?status, consumed = new_in, written = new_out, "inflate step");

        if status == Status::StreamEnd {
            return Ok(finished(new_out, new_in));
        }
        if new_out >= dst.len() {
            return probe_overflow(&mut engine, src, dst.len());
        }
        if new_in >= src.len() {
            return Err(corrupt(src, "stream truncated"));
        }
        if new_in == in_pos && new_out == out_pos {
            return Err(corrupt(src, "inflate engine made no progress"));
        }
    }
}

/// Destination is full but the stream has not ended. A one-byte scratch
/// decode tells a short buffer apart from an exact fit or a truncated stream.
fn probe_overflow(engine: &mut Decompress, src: &[u8], capacity: usize) -> Result<Decompressed> {
    let mut spare = [0u8; 1];
    let in_pos = engine.total_in() as usize;
    let status = engine
        .decompress(&src[in_pos..], &mut spare, FlushDecompress::None)
        .map_err(|e| corrupt(src, e.to_string()))?;

    if engine.total_out() as usize > capacity {
        debug!(source_len = src.len(), capacity, "decompress: destination full");
        return Err(CodecError::insufficient(capacity));
    }
    if status == Status::StreamEnd {
        return Ok(finished(capacity, engine.total_in() as usize));
    }
    Err(corrupt(src, "stream truncated"))
}

#[inline(always)]
fn finished(written: usize, consumed: usize) -> Decompressed {
    debug!(compressed_len = consumed, decompressed_len = written, "decompressed buffer");
    Decompressed { written, consumed }
}

fn corrupt(src: &[u8], reason: impl Into<String>) -> CodecError {
    let err = CodecError::corrupt(reason);
    debug!(source_len = src.len(), error = %err, "decompress rejected input");
    err
}

// ------------------------------------------------------------------
// 4. Owned variants
// ------------------------------------------------------------------
/// Compress into a freshly allocated buffer sized by [`compress_bound`].
pub fn compress(src: &[u8], cfg: &CodecConfig) -> Result<Vec<u8>> {
    let mut out = vec![0u8; compress_bound(src.len())];
    let written = compress_into_with(src, &mut out, cfg)?;
    out.truncate(written);
    Ok(out)
}

/// Decompress into a buffer that doubles on `InsufficientBuffer` until
/// `cfg.max_output` is reached.
pub fn decompress(src: &[u8], cfg: &CodecConfig) -> Result<Vec<u8>> {
    cfg.validate()?;
    let mut capacity = src.len().saturating_mul(4).max(64).min(cfg.max_output);

    loop {
        let mut out = vec![0u8; capacity];
        match decompress_into(src, &mut out) {
            Ok(written) => {
                out.truncate(written);
                return Ok(out);
            }
            Err(CodecError::InsufficientBuffer { .. }) if capacity < cfg.max_output => {
                capacity = capacity.saturating_mul(2).min(cfg.max_output);
                debug!(capacity, "growing decompression buffer");
            }
            Err(e) => return Err(e),
        }
    }
}
