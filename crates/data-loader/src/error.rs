//! Error types for the data-loader crate.
//!
//! Shaping itself never fails (malformed fields degrade to defaults), so
//! these errors only come from reading a raw dump off disk.

use thiserror::Error;

/// Errors that can occur while loading a raw recipe dump
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid JSON
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// Valid JSON, but neither an object of rows nor an array of rows
    #[error("Unexpected top-level {found} in {file}, expected an object or array of recipes")]
    UnexpectedShape { file: String, found: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
