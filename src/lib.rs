//! Abalone age prediction
//!
//! A small end-to-end example: load the abalone measurement dataset, run a
//! fixed feature pipeline (label copy, one-hot sex encoding, feature
//! concatenation), train a tree-ensemble regressor on the result, persist the
//! model, and predict the age of a sample specimen.
//!
//! # Modules
//!
//! - [`data`] - record schema and dataset loading
//! - [`pipeline`] - the ordered feature transforms
//! - [`training`] - training configuration, driver and trained model
//! - [`export`] - model serialization to disk

// Core error handling
pub mod error;

pub mod data;
pub mod pipeline;
pub mod training;
pub mod export;

pub use error::{AbaloneError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::data::{Abalone, AgePrediction, DatasetLoader};
    pub use crate::error::{AbaloneError, Result};
    pub use crate::export::{load_model, save_model, ModelMetadata};
    pub use crate::pipeline::{FeaturePipeline, OneHotEncoder};
    pub use crate::training::{train, AgeModel, TrainingConfig};
}
