//! Buffer codec errors with stable numeric status codes.

use thiserror::Error;

// ------------------------------------------------------------------
// 1. Stable numeric codes (zlib-compatible values)
// ------------------------------------------------------------------
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok = 0,
    CorruptData = -3,
    InvalidInput = -4,
    InsufficientBuffer = -5,
}

impl StatusCode {
    #[inline(always)]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

// ------------------------------------------------------------------
// 2. Detailed Rust-side error
// ------------------------------------------------------------------
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Destination capacity too small. Retry with at least `needed_at_least` bytes
    /// or size the buffer with [`compress_bound`](super::compress_bound).
    #[error("destination buffer too small: capacity {capacity}, need at least {needed_at_least}")]
    InsufficientBuffer {
        capacity: usize,
        needed_at_least: usize,
    },
    #[error("corrupt compressed data: {reason}")]
    CorruptData { reason: String },
    #[error("invalid input: {details}")]
    InvalidInput { details: String },
}

impl CodecError {
    /// Numeric status for callers that report raw codes.
    #[inline(always)]
    pub fn code(&self) -> StatusCode {
        match self {
            Self::InsufficientBuffer { .. } => StatusCode::InsufficientBuffer,
            Self::CorruptData { .. } => StatusCode::CorruptData,
            Self::InvalidInput { .. } => StatusCode::InvalidInput,
        }
    }

    /// Only a short destination can be fixed by retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InsufficientBuffer { .. })
    }

    pub(crate) fn insufficient(capacity: usize) -> Self {
        Self::InsufficientBuffer {
            capacity,
            needed_at_least: capacity.saturating_add(1),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptData { reason: reason.into() }
    }

    pub(crate) fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidInput { details: details.into() }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_zlib_values() {
        assert_eq!(CodecError::insufficient(8).code().as_i32(), -5);
        assert_eq!(CodecError::corrupt("bad header").code().as_i32(), -3);
        assert_eq!(CodecError::invalid("level 12").code().as_i32(), -4);
        assert_eq!(StatusCode::Ok.as_i32(), 0);
    }

    #[test]
    fn only_short_buffers_are_retryable() {
        assert!(CodecError::insufficient(0).is_retryable());
        assert!(!CodecError::corrupt("x").is_retryable());
        assert!(!CodecError::invalid("x").is_retryable());
    }

    #[test]
    fn display_names_the_capacity() {
        let msg = CodecError::insufficient(32).to_string();
        assert!(msg.contains("capacity 32"), "{msg}");
        assert!(msg.contains("at least 33"), "{msg}");
    }
}
