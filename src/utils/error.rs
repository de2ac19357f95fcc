//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while aggregating a log stream
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Log input unavailable: {0}")]
    InputUnavailable(#[from] std::io::Error),
}

/// Errors reported by log intake before aggregation starts
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("No file selected")]
    EmptyFilename,

    #[error("Log file not found: {0}")]
    MissingFile(String),

    #[error("Log file is too large ({size} bytes, limit {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Empty frequency table")]
    EmptyTable,

    #[error("Failed to write chart: {0}")]
    Output(#[from] OutputError),
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
