//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in commands and the CLI.
//!
//! Navigation has no error type: every movement is clamped.

use crate::heap::HeapId;
use thiserror::Error;

/// Errors that can occur while decoding a raw trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),

    #[error("Invalid raw step {index}: {reason}")]
    InvalidStep { index: usize, reason: String },
}

/// Errors that abort a normalization pass
///
/// No partially-normalized trace is ever returned alongside one of these.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Step {step} references heap object {heap_id} which is not in its heap")]
    DanglingReference { step: usize, heap_id: HeapId },

    #[error("Trace has {steps} steps, which exceeds the limit of {limit}")]
    TraceTooLong { steps: usize, limit: usize },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a normalizer config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
