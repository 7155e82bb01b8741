//! Error types for framekit operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`FrameError`].
pub type Result<T> = std::result::Result<T, FrameError>;

/// Error types for data frame, dataset, and stream operations.
#[derive(Debug, Error)]
pub enum FrameError {
    // ==================== Loading Errors ====================
    /// Malformed manifest or data frame document.
    #[error("Decode error in {source_name}: {message}")]
    Decode {
        source_name: String,
        message: String,
    },

    /// I/O failure opening or reading a file.
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two columns share a name and the load policy rejects duplicates.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    // ==================== Access Errors ====================
    /// Column name not present in the frame.
    #[error("There is no variable [{0}] in the data frame")]
    UnknownColumn(String),

    /// Cell type doesn't match the requested accessor.
    #[error("Type mismatch in row {row}, column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        row: usize,
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Operation needs at least one row.
    #[error("Data frame has no rows")]
    EmptyFrame,

    /// Row index past the end of the table.
    #[error("Row {row} out of range (frame has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// Row has fewer cells than a referenced column position.
    #[error("Row {row} has {len} cells, position {position} requested")]
    ShortRow {
        row: usize,
        len: usize,
        position: usize,
    },

    // ==================== Vector Spec Errors ====================
    /// Vector spec names no columns.
    #[error("Vector spec must provide at least one var name")]
    EmptySpec,

    /// Columns in a vector spec have different element types.
    #[error("Invalid vector spec: column {column} has element type {actual}, expected {expected}")]
    InvalidVectorSpec {
        column: String,
        expected: String,
        actual: String,
    },

    /// Cell is null where a value was required.
    #[error("Variable at position {position} in row {row} is null")]
    NullVariable { row: usize, position: usize },

    /// Cell is neither a number nor an array of numbers.
    #[error("In row {row}, vector of type {type_name} is not supported")]
    UnsupportedVariableType { row: usize, type_name: &'static str },

    // ==================== Stream Errors ====================
    /// Invalid configuration.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Prefetching producer thread could not be started.
    #[error("Failed to spawn producer thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// Prefetching producer thread panicked.
    #[error("Producer thread panicked: {0}")]
    ProducerPanic(String),
}

impl FrameError {
    /// Builds a decode error tagged with the name of its source.
    pub(crate) fn decode(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        FrameError::Decode {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }

    /// Builds a file read error for `path`.
    pub(crate) fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FrameError::FileRead {
            path: path.into(),
            source,
        }
    }
}
