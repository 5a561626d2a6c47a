//! Error types for neowatch
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for neowatch operations
pub type Result<T> = std::result::Result<T, NeoError>;

/// Errors that can occur while loading, linking, or writing NEO data
#[derive(Error, Debug)]
pub enum NeoError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing or writing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric field that should parse as a float did not
    #[error("invalid numeric field: {0}")]
    InvalidNumber(#[from] std::num::ParseFloatError),

    /// An entity was constructed without its primary designation
    #[error("missing primary designation")]
    MissingDesignation,

    /// A named column is absent from the close-approach dataset header
    #[error("column not found in dataset: {name}")]
    MissingColumn { name: String },

    /// Output path extension does not map to a supported format
    #[error("unsupported output format: {path}")]
    UnsupportedOutputFormat { path: PathBuf },
}

impl NeoError {
    /// Create a missing-column error
    pub fn missing_column(name: impl Into<String>) -> Self {
        NeoError::MissingColumn { name: name.into() }
    }

    /// Create an unsupported-output-format error
    pub fn unsupported_output_format(path: impl Into<PathBuf>) -> Self {
        NeoError::UnsupportedOutputFormat { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NeoError::missing_column("v_rel");
        assert!(err.to_string().contains("v_rel"));
    }

    #[test]
    fn test_missing_designation_display() {
        let err = NeoError::MissingDesignation;
        assert!(err.to_string().contains("designation"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NeoError = io_err.into();
        assert!(matches!(err, NeoError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: NeoError = json_err.into();
        assert!(matches!(err, NeoError::Json(_)));
    }

    #[test]
    fn test_parse_float_conversion() {
        let parse_err = "sixteen".parse::<f64>().unwrap_err();
        let err: NeoError = parse_err.into();
        assert!(matches!(err, NeoError::InvalidNumber(_)));
    }

    #[test]
    fn test_unsupported_output_format() {
        let err = NeoError::unsupported_output_format("results.xml");
        assert!(err.to_string().contains("results.xml"));
        assert!(matches!(err, NeoError::UnsupportedOutputFormat { .. }));
    }
}
