//! Error types for table construction, ingestion and export.

use std::path::PathBuf;
use thiserror::Error;

use trendtab_model::ModelError;

/// Errors that can occur while configuring, filling or exporting a table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
    // === Configuration Errors ===
    /// Invalid direction keyword, cell format or column key.
    #[error("invalid configuration: {0}")]
    Config(#[from] ModelError),

    /// Timestamp pattern contains an unknown strftime specifier.
    #[error("invalid timestamp format '{format}'")]
    InvalidTimestampFormat { format: String },

    /// Moving average window of zero.
    #[error("moving average window must be at least 1")]
    InvalidWindow,

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::TableConfig`].
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // === Schema Errors ===
    /// Row column count differs from the declared headers.
    #[error("row has {found} columns, expected {expected}")]
    SchemaMismatch { expected: usize, found: usize },

    /// Row carries a column that the fixed schema does not declare.
    #[error("row has undeclared column '{column}'")]
    UnknownColumn { column: String },

    /// Row carries a key that names a derived moving average column.
    #[error("column '{column}' is reserved for a moving average")]
    ReservedColumn { column: String },

    // === Export Errors ===
    /// Failed to write a text export.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a CSV export.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
