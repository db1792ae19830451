//! Training driver
//!
//! Reads the dataset, fits the pipeline and trainer, writes the model
//! artifact, and hands the model back as an explicit value for the caller to
//! predict with.

mod model;

pub use model::AgeModel;

use crate::data::{Abalone, DatasetLoader};
use crate::error::Result;
use crate::export::{self, ModelMetadata};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Paths used by a training run.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Delimited dataset, one record per line.
    pub data_path: PathBuf,
    /// Where the serialized model is written; overwritten on every run.
    pub model_path: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Data/abalone.data.txt"),
            model_path: PathBuf::from("Data/Model.zip"),
        }
    }
}

/// Train a model from the configured dataset and persist it.
pub fn train(config: &TrainingConfig) -> Result<AgeModel> {
    let start = Instant::now();

    let records = DatasetLoader::new().load(&config.data_path)?;
    info!(
        rows = records.len(),
        path = %config.data_path.display(),
        "loaded dataset"
    );

    let model = AgeModel::fit(&records)?;

    let predictions = model.predict_batch(&records)?;
    let (rmse, mae) = regression_error(&records, &predictions);
    info!(
        rmse,
        mae,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "training complete"
    );

    let metadata = ModelMetadata::new("abalone-age")
        .with_model_type("random_forest_regressor")
        .with_features(model.pipeline().feature_columns().to_vec())
        .with_target(model.pipeline().label_column());
    export::save_model(&model, &config.model_path, metadata)?;

    let bytes = std::fs::metadata(&config.model_path)?.len();
    info!(path = %config.model_path.display(), bytes, "model written");

    Ok(model)
}

/// Training-set RMSE and MAE.
fn regression_error(records: &[Abalone], predictions: &[f64]) -> (f64, f64) {
    let n = records.len().max(1) as f64;
    let mut squared = 0.0;
    let mut absolute = 0.0;
    for (record, prediction) in records.iter().zip(predictions) {
        let residual = record.age - prediction;
        squared += residual * residual;
        absolute += residual.abs();
    }
    ((squared / n).sqrt(), absolute / n)
}
