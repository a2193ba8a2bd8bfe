//! Codec settings: compression level and the growth ceiling for owned decompression.

use flate2::Compression;
use serde::{Deserialize, Serialize};

use super::errors::{CodecError, Result};

/// zlib's `Z_DEFAULT_COMPRESSION` resolves to level 6.
pub const DEFAULT_LEVEL: u32 = 6;
pub const MAX_LEVEL: u32 = 9;
/// Ceiling for [`decompress`](super::decompress) when it grows its own output.
pub const DEFAULT_MAX_OUTPUT: usize = 64 * 1024 * 1024;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    pub level: u32, // 0..=9
    pub max_output: usize,
}

impl Default for CodecConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }
}

impl CodecConfig {
    #[inline(always)]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[inline(always)]
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    /// Fastest setting: stored blocks, no matching.
    pub fn stored() -> Self {
        Self::default().with_level(0)
    }

    pub fn best() -> Self {
        Self::default().with_level(MAX_LEVEL)
    }

    pub fn validate(&self) -> Result<()> {
        if self.level > MAX_LEVEL {
            return Err(CodecError::invalid(format!(
                "compression level {} outside 0..={}",
                self.level, MAX_LEVEL
            )));
        }
        if self.max_output == 0 {
            return Err(CodecError::invalid("max_output must be non-zero"));
        }
        Ok(())
    }

    pub(crate) fn compression(&self) -> Result<Compression> {
        self.validate()?;
        Ok(Compression::new(self.level))
    }
}
