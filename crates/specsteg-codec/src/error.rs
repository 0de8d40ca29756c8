//! Error types for the steganography codec.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while hiding or recovering a payload.
///
/// Every variant aborts the whole operation. Skipping a bad block would shift
/// the alignment of every block after it, so nothing is substituted.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Source path does not exist.
    #[error("input not found: {}", path.display())]
    MissingInput {
        /// The missing path.
        path: PathBuf,
    },

    /// Audio container could not be parsed or has an unsupported layout.
    #[error("unsupported carrier format: {message}")]
    UnsupportedCarrierFormat {
        /// What was wrong with the container.
        message: String,
    },

    /// A decode window does not match the block size the codec expects.
    #[error("block length mismatch: expected {expected} samples, found {found}")]
    BlockLengthMismatch {
        /// Expected window length.
        expected: usize,
        /// Actual window length.
        found: usize,
    },

    /// A decode input falls outside the invertible range of the transform.
    #[error("value out of domain at index {index}: {value}")]
    ValueOutOfDomain {
        /// Position of the offending value within its window.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Invalid configuration value.
    #[error("invalid config '{name}': {message}")]
    InvalidConfig {
        /// Field name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Length-prefixed frame header could not be parsed.
    #[error("invalid frame header: {message}")]
    InvalidFrameHeader {
        /// Error message.
        message: String,
    },

    /// The carrier holds fewer payload bytes than the header or caller expects.
    #[error("truncated carrier: expected {expected} payload bytes, found {found}")]
    TruncatedCarrier {
        /// Expected payload length.
        expected: usize,
        /// Bytes actually recovered.
        found: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Creates an invalid config error.
    pub fn invalid_config(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported carrier format error.
    pub fn unsupported_carrier(message: impl Into<String>) -> Self {
        Self::UnsupportedCarrierFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid frame header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidFrameHeader {
            message: message.into(),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::MissingInput { .. } => "STEG_001",
            CodecError::UnsupportedCarrierFormat { .. } => "STEG_002",
            CodecError::BlockLengthMismatch { .. } => "STEG_003",
            CodecError::ValueOutOfDomain { .. } => "STEG_004",
            CodecError::InvalidConfig { .. } => "STEG_005",
            CodecError::InvalidFrameHeader { .. } => "STEG_006",
            CodecError::TruncatedCarrier { .. } => "STEG_007",
            CodecError::Io(_) => "STEG_008",
        }
    }

    /// Error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            CodecError::MissingInput { .. } | CodecError::Io(_) => "io",
            CodecError::UnsupportedCarrierFormat { .. } => "carrier",
            CodecError::InvalidConfig { .. } => "config",
            CodecError::BlockLengthMismatch { .. }
            | CodecError::ValueOutOfDomain { .. }
            | CodecError::InvalidFrameHeader { .. }
            | CodecError::TruncatedCarrier { .. } => "decode",
        }
    }
}

impl From<hound::Error> for CodecError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => CodecError::Io(e),
            other => CodecError::unsupported_carrier(other.to_string()),
        }
    }
}
