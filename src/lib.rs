//! Whole-buffer zlib compression into caller-sized destinations, plus the
//! round-trip runner behind the `roundtrip` binary.

pub mod compression;
pub mod roundtrip;

pub use compression::{
    compress_bound, compress_into, compress_into_with, decompress_into, decompress_into_partial,
    CodecConfig, CodecError, StatusCode,
};
