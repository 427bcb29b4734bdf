//! Error types for stock_reconcile

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for loading exports and writing reports
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The CSV reader rejected a record (bad quoting, uneven row width, ...)
    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The file has no header row to skip
    #[error("{} is empty, expected a header row", .path.display())]
    EmptyInput { path: PathBuf },
    /// A row is too short for a configured column
    #[error("{} line {line}: no column {column}", .path.display())]
    MissingColumn {
        path: PathBuf,
        line: u64,
        column: usize,
    },
    /// A column the loader reads is not valid UTF-8
    #[error("{} line {line}: column {column} is not valid UTF-8", .path.display())]
    InvalidUtf8 {
        path: PathBuf,
        line: u64,
        column: usize,
    },
    /// Quantity field is not a finite decimal number
    #[error("{} line {line}: invalid quantity '{value}'", .path.display())]
    InvalidQuantity {
        path: PathBuf,
        line: u64,
        value: String,
    },
    /// Schema configuration file could not be parsed
    #[error("invalid schema config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReconcileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReconcileError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for stock_reconcile operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
