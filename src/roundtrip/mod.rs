//! Compress a message into a fixed stage buffer, decompress it into a
//! separate output buffer, and hand back the reconstructed bytes.

mod config;

use thiserror::Error;
use tracing::{info, instrument};

use crate::compression::{compress_into_with, decompress_into, CodecError, StatusCode};

pub use config::{
    ConfigError, RoundTripConfig, CONFIG_PATH_VAR, LEVEL_VAR, MESSAGE_VAR, OUTPUT_CAPACITY_VAR,
    STAGE_CAPACITY_VAR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Uncompress,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compress => "compress",
            Self::Uncompress => "uncompress",
        }
    }
}

/// A codec failure tagged with the step that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error: [{}] {}", .source.code(), .operation.as_str())]
pub struct RoundTripError {
    pub operation: Operation,
    #[source]
    pub source: CodecError,
}

impl RoundTripError {
    pub fn code(&self) -> StatusCode {
        self.source.code()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub stage_len: usize,
    pub output: Vec<u8>,
}

impl RoundTrip {
    /// Output up to its first NUL, as C string printing would show it.
    pub fn text(&self) -> String {
        let end = self
            .output
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.output.len());
        String::from_utf8_lossy(&self.output[..end]).into_owned()
    }
}

#[instrument(skip(cfg), fields(stage = cfg.stage_capacity, output = cfg.output_capacity))]
pub fn run(cfg: &RoundTripConfig) -> Result<RoundTrip, RoundTripError> {
    let input = cfg.payload();

    let mut stage = vec![0u8; cfg.stage_capacity];
    let stage_len = compress_into_with(&input, &mut stage, &cfg.codec).map_err(|source| {
        RoundTripError {
            operation: Operation::Compress,
            source,
        }
    })?;

    let mut output = vec![0u8; cfg.output_capacity];
    let out_len = decompress_into(&stage[..stage_len], &mut output).map_err(|source| {
        RoundTripError {
            operation: Operation::Uncompress,
            source,
        }
    })?;
    output.truncate(out_len);

    info!(input_len = input.len(), stage_len, out_len, "round trip complete");
    Ok(RoundTrip { stage_len, output })
}
