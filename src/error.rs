use std::path::PathBuf;

use crate::math::scalar::Precision;

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the library can report.
///
/// The network itself only ever produces `DimensionMismatch`,
/// `InvalidModelShape`, `EmptyLayer` and `ShapeOverflow`; the remaining
/// variants come from the dataset loader, model files and the training driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{what} has {actual} values, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("model has {actual} parameters, expected {expected}")]
    InvalidModelShape { expected: usize, actual: usize },

    #[error("{layer} layer must have at least one unit")]
    EmptyLayer { layer: &'static str },

    #[error("shape {input_size}-{hidden_size}-{output_size} has more parameters than fit in memory")]
    ShapeOverflow {
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
    },

    #[error("line {line}: expected at least {expected} values, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: '{token}' is not a valid number")]
    InvalidNumber { line: usize, token: String },

    #[error("can't open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset contains no samples")]
    EmptyDataset,

    #[error("model text: {0}")]
    ModelText(String),

    #[error("model was saved as {found}, loaded as {expected}")]
    PrecisionMismatch { expected: Precision, found: Precision },

    #[error("invalid training configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
