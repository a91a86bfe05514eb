//! Error types for the Lumos enhancement pipeline.
//!
//! Pipeline failures never cross the pipeline/controller boundary as Rust
//! errors: they are captured at their origin stage and folded into an
//! [`EnhancementError`] carried by the result. The lower-level enums here
//! (`CodecError`, `TransformError`) supply the diagnostic text for that value.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Stable error taxonomy reported with every enhancement result.
///
/// The numeric codes and string forms are part of the external contract and
/// must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorKind {
    /// Sentinel for successful results
    #[default]
    None,
    /// Malformed or unsupported request, caught before any I/O
    InvalidRequest,
    /// Input unreadable or malformed
    DecodeFailed,
    /// Transform stage failure
    ProcessFailed,
    /// Output unwritable
    EncodeFailed,
}

impl ErrorKind {
    /// Numeric code of this kind.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::None => 0,
            ErrorKind::InvalidRequest => 1,
            ErrorKind::DecodeFailed => 2,
            ErrorKind::ProcessFailed => 3,
            ErrorKind::EncodeFailed => 4,
        }
    }

    /// Stable string form, as written to telemetry.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::None => "none",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::DecodeFailed => "decode_failed",
            ErrorKind::ProcessFailed => "process_failed",
            ErrorKind::EncodeFailed => "encode_failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Pipeline stage a run failed in (`None` on success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    #[default]
    None,
    Validate,
    Decode,
    Process,
    Encode,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::None => "none",
            Stage::Validate => "validate",
            Stage::Decode => "decode",
            Stage::Process => "process",
            Stage::Encode => "encode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Failure description carried by an unsuccessful [`EnhancementResult`].
///
/// [`EnhancementResult`]: crate::types::EnhancementResult
#[derive(Error, Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[error("{stage}: {message}")]
pub struct EnhancementError {
    /// Which class of failure occurred
    pub kind: ErrorKind,
    /// Where the failure occurred
    pub stage: Stage,
    /// Human-readable diagnostic
    pub message: String,
}

impl EnhancementError {
    pub fn new(kind: ErrorKind, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            message: message.into(),
        }
    }

    /// Request rejected during validation.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, Stage::Validate, message)
    }

    /// Input could not be read or parsed.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DecodeFailed, Stage::Decode, message)
    }

    /// A transform stage failed.
    pub fn process(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ProcessFailed, Stage::Process, message)
    }

    /// Output could not be written.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodeFailed, Stage::Encode, message)
    }

    /// True for the success sentinel (`ErrorKind::None`).
    pub fn is_none(&self) -> bool {
        self.kind == ErrorKind::None
    }
}

/// Image codec errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Failed to read the input file
    #[error("failed to open file: {0}")]
    Read(#[source] std::io::Error),

    /// Fewer than four header tokens, or the magic is missing
    #[error("unsupported or invalid ppm header")]
    InvalidHeader,

    /// Magic token other than `P3`
    #[error("unsupported ppm magic '{0}' (expected P3)")]
    UnsupportedMagic(String),

    /// A header token is not an integer
    #[error("invalid ppm {field}: '{token}' is not an integer")]
    InvalidHeaderValue { field: &'static str, token: String },

    /// Width, height or max value is zero or negative
    #[error("ppm {field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: i64 },

    /// Header value does not fit the in-memory representation
    #[error("ppm {field} out of range (got {value})")]
    OutOfRange { field: &'static str, value: i64 },

    /// Sample count overflows the address space
    #[error("ppm dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// Fewer sample tokens than width*height*3
    #[error("ppm data is incomplete: expected {expected} samples, found {found}")]
    Incomplete { expected: usize, found: usize },

    /// A sample token is not an integer
    #[error("ppm pixel parse failed at sample {index}: '{token}'")]
    InvalidSample { index: usize, token: String },

    /// Pixel buffer does not match the declared dimensions
    #[error("pixel buffer has {actual} entries, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },

    /// Output parent directory could not be created
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be opened for writing
    #[error("failed to open output path {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing pixel data failed part way
    #[error("failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

/// Transform stage errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Upscaled dimensions overflow
    #[error("upscaled size of {width}x{height} by {scale} overflows")]
    DimensionOverflow { width: u32, height: u32, scale: u32 },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors observed through an asynchronous enhancement handle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The run has not finished yet
    #[error("enhancement still in progress")]
    NotReady,

    /// The result was already taken from this handle
    #[error("enhancement result already taken")]
    AlreadyTaken,

    /// The worker task ended without producing a result
    #[error("enhancement task aborted: {0}")]
    Aborted(String),
}

/// Convenience type alias for codec results.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        assert_eq!(ErrorKind::None.code(), 0);
        assert_eq!(ErrorKind::InvalidRequest.code(), 1);
        assert_eq!(ErrorKind::DecodeFailed.code(), 2);
        assert_eq!(ErrorKind::ProcessFailed.code(), 3);
        assert_eq!(ErrorKind::EncodeFailed.code(), 4);
    }

    #[test]
    fn test_error_kind_strings() {
        assert_eq!(ErrorKind::InvalidRequest.to_string(), "invalid_request");
        assert_eq!(ErrorKind::DecodeFailed.as_str(), "decode_failed");
        assert_eq!(ErrorKind::ProcessFailed.as_str(), "process_failed");
        assert_eq!(ErrorKind::EncodeFailed.as_str(), "encode_failed");
    }

    #[test]
    fn test_enhancement_error_display() {
        let err = EnhancementError::decode("failed to open file");
        assert_eq!(err.to_string(), "decode: failed to open file");
        assert_eq!(err.kind, ErrorKind::DecodeFailed);
        assert!(!err.is_none());
        assert!(EnhancementError::default().is_none());
    }

    #[test]
    fn test_enhancement_error_serializes_stable_strings() {
        let err = EnhancementError::invalid_request("input_path must not be empty");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"invalid_request\""));
        assert!(json.contains("\"stage\":\"validate\""));
    }
}
