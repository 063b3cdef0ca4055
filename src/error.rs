//! Error types for the pl-curve library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum PlCurveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid abundance value '{value}' at row {row}, column {col}")]
    InvalidAbundance {
        value: String,
        row: usize,
        col: usize,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Missing column '{0}' in table header")]
    MissingColumn(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("columns don't sum to 1: sample '{sample}' totals {total}")]
    ColumnSum { sample: String, total: f64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Plot rendering error: {0}")]
    Plot(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, PlCurveError>;
