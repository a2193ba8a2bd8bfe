use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::compression::CodecConfig;

pub const CONFIG_PATH_VAR: &str = "BUFCODEC_CONFIG";
pub const LEVEL_VAR: &str = "BUFCODEC_LEVEL";
pub const STAGE_CAPACITY_VAR: &str = "BUFCODEC_STAGE_CAPACITY";
pub const OUTPUT_CAPACITY_VAR: &str = "BUFCODEC_OUTPUT_CAPACITY";
pub const MESSAGE_VAR: &str = "BUFCODEC_MESSAGE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {details}")]
    Invalid { key: &'static str, details: String },
}

/// Settings for one compress-then-decompress run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RoundTripConfig {
    /// Text to round-trip; a NUL terminator is appended before compressing.
    pub message: String,
    pub stage_capacity: usize,
    pub output_capacity: usize,
    pub codec: CodecConfig,
}

impl Default for RoundTripConfig {
    fn default() -> Self {
        Self {
            message: "hello, hello!".to_string(),
            stage_capacity: 32,
            output_capacity: 32,
            codec: CodecConfig::default(),
        }
    }
}

impl RoundTripConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// File named by `BUFCODEC_CONFIG` (or defaults), then env overrides.
    /// Call `dotenv::dotenv()` first if a `.env` file should count.
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `BUFCODEC_*` overrides from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(LEVEL_VAR) {
            self.codec.level = parse_var(LEVEL_VAR, &v)?;
        }
        if let Some(v) = lookup(STAGE_CAPACITY_VAR) {
            self.stage_capacity = parse_var(STAGE_CAPACITY_VAR, &v)?;
        }
        if let Some(v) = lookup(OUTPUT_CAPACITY_VAR) {
            self.output_capacity = parse_var(OUTPUT_CAPACITY_VAR, &v)?;
        }
        if let Some(v) = lookup(MESSAGE_VAR) {
            self.message = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate().map_err(|e| ConfigError::Invalid {
            key: "codec",
            details: e.to_string(),
        })?;
        if self.message.contains('\0') {
            return Err(ConfigError::Invalid {
                key: "message",
                details: "must not contain NUL".to_string(),
            });
        }
        Ok(())
    }

    /// Message bytes plus the trailing NUL, as the stage input.
    pub fn payload(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.message.len() + 1);
        bytes.extend_from_slice(self.message.as_bytes());
        bytes.push(0);
        bytes
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        details: format!("{raw:?}: {e}"),
    })
}
