//! Error types for the abalone age predictor

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, AbaloneError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum AbaloneError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Preprocessing error: {0}")]
    PreprocessingError(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,
}

impl From<polars::error::PolarsError> for AbaloneError {
    fn from(err: polars::error::PolarsError) -> Self {
        AbaloneError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for AbaloneError {
    fn from(err: serde_json::Error) -> Self {
        AbaloneError::SerializationError(err.to_string())
    }
}
