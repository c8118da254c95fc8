//! Interactor error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the interactor and its stores
#[derive(Error, Debug)]
pub enum InteractorError {
    /// I/O failure while reading or writing a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Option name not present in the store
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Option exists with a different value type
    #[error("Option {name} is not a {expected}")]
    OptionType { name: String, expected: &'static str },

    /// Interaction file to play does not exist
    #[error("Interaction record file to play does not exist: {}", .0.display())]
    RecordFileMissing(PathBuf),

    /// Empty path given to the recorder
    #[error("No interaction record file provided")]
    EmptyRecordPath,

    /// Malformed interaction file
    #[error("Invalid interaction record {}: {reason}", .path.display())]
    InvalidRecord { path: PathBuf, reason: String },

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Replayed interaction stopped the interactor
    #[error("Interactor has been stopped")]
    Stopped,
}

/// Result type for interactor operations
pub type Result<T> = std::result::Result<T, InteractorError>;
