//! Error types for state and preset operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting or loading parameters.
#[derive(Debug, Error)]
pub enum StateError {
    /// The state stream ended before all fields were read.
    #[error("state stream truncated while reading '{field}'")]
    Truncated {
        /// Name of the field the decoder was reading.
        field: &'static str,
    },

    /// The stored waveform value maps to no known waveform.
    ///
    /// Carries the raw stored float so that negative, fractional, and
    /// non-finite values show up verbatim in the message.
    #[error("invalid waveform index: {0}")]
    InvalidWaveform(f32),

    /// A preset value is outside its nominal range.
    #[error("parameter '{param}' out of range: {value} (expected 0.0 to 1.0)")]
    OutOfRange {
        /// Name of the offending parameter.
        param: &'static str,
        /// Value found in the preset.
        value: f32,
    },

    /// I/O failure other than truncation.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read a preset file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a preset file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory for a preset file
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl StateError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StateError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StateError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StateError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
