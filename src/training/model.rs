//! Trained age-regression model

use crate::data::{self, Abalone, AgePrediction};
use crate::error::{AbaloneError, Result};
use crate::pipeline::{transforms, FeaturePipeline};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};

/// A fitted feature pipeline plus the tree-ensemble regressor trained on its
/// output. The pipeline travels with the forest so a record encodes exactly
/// the way the training data did.
#[derive(Debug, Serialize, Deserialize)]
pub struct AgeModel {
    pipeline: FeaturePipeline,
    forest: RandomForestRegressor<f64, f64, Array2<f64>, Vec<f64>>,
}

impl AgeModel {
    /// Fit the pipeline and train the forest with default hyperparameters.
    pub fn fit(records: &[Abalone]) -> Result<Self> {
        if records.is_empty() {
            return Err(AbaloneError::TrainingError(
                "training set is empty".to_string(),
            ));
        }

        let df = data::to_frame(records)?;

        let mut pipeline = FeaturePipeline::for_abalone();
        pipeline.fit(&df)?;

        let transformed = pipeline.transform(&df)?;
        let x = transforms::concatenate(&transformed, pipeline.feature_columns())?;
        let y = pipeline.labels(&transformed)?;

        let forest =
            RandomForestRegressor::fit(&x, &y, RandomForestRegressorParameters::default())
                .map_err(|e| AbaloneError::TrainingError(e.to_string()))?;

        Ok(Self { pipeline, forest })
    }

    /// Predict the age of a single record. The record's `age` field is
    /// ignored.
    pub fn predict(&self, record: &Abalone) -> Result<AgePrediction> {
        let ages = self.predict_batch(std::slice::from_ref(record))?;
        let age = ages
            .first()
            .copied()
            .ok_or_else(|| AbaloneError::InferenceError("empty prediction".to_string()))?;
        Ok(AgePrediction { age })
    }

    /// Predict ages for a slice of records.
    pub fn predict_batch(&self, records: &[Abalone]) -> Result<Vec<f64>> {
        let df = data::to_frame(records)?;
        let x = self.pipeline.features(&df)?;
        self.forest
            .predict(&x)
            .map_err(|e| AbaloneError::InferenceError(e.to_string()))
    }

    pub fn pipeline(&self) -> &FeaturePipeline {
        &self.pipeline
    }
}
