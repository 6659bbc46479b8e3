//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for tidystring application plumbing.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the CLI, cache, and site passes.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading a search index fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Index file not found at the expected path.
    #[error("Search index not found at {}", path.display())]
    NotFound { path: PathBuf },
    /// The file could not be read.
    #[error("Failed to read search index at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The payload is neither bare JSON nor wrapped in `Search.setIndex(...)`.
    #[error("Search index is not wrapped in Search.setIndex(...): starts with {prefix:?}")]
    MissingWrapper { prefix: String },
    /// The JSON payload does not match the index schema.
    #[error("Failed to parse search index: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by the string utilities.
#[derive(Debug, thiserror::Error)]
pub enum TidyError {
    /// The pattern is not valid syntax for the regex engine.
    #[error("Invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    /// `str_search_recase` received an unknown case name.
    #[error("Unsupported case {0:?}; implemented case options: lower, upper, title, snakecase, camelcase")]
    UnsupportedCase(String),
    /// `str_pad` received an unknown side.
    #[error("Side must be one of 'left', 'right', or 'both', got {0:?}")]
    InvalidSide(String),
    /// A table operation named a column the table does not have.
    #[error("Unknown column {0:?}")]
    UnknownColumn(String),
    /// Columns combined element-wise must have equal lengths.
    #[error("Column length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// An unknown cheatsheet group was requested.
    #[error(
        "Invalid group {0:?}. Valid options are: basic, case, detection, extraction, modification, regex, input_types"
    )]
    UnknownGroup(String),
}
