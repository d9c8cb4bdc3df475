//! Error types for model parsing and configuration values.

use thiserror::Error;

/// Errors raised while parsing configuration-level model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Direction keyword is not one of the recognized spellings.
    #[error("unknown direction keyword '{keyword}' (expected asc, desc or none)")]
    UnknownDirection { keyword: String },

    /// Cell format string could not be parsed.
    #[error("invalid cell format '{format}': {reason}")]
    InvalidFormat { format: String, reason: String },

    /// Column key carries the format suffix separator more than once.
    #[error("column key '{key}' has more than one format suffix separator '___'")]
    DuplicateFormatSuffix { key: String },

    /// Column key is empty once the format suffix is removed.
    #[error("column key '{key}' has an empty column name")]
    EmptyColumnName { key: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::UnknownDirection {
            keyword: "sideways".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown direction keyword 'sideways' (expected asc, desc or none)"
        );
    }
}
