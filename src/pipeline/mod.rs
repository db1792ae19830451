//! Feature pipeline
//!
//! Training runs a fixed, ordered list of column transforms ahead of the
//! trainer: copy the target into the label slot, one-hot encode the sex
//! column, concatenate the selected columns into the feature vector.
//! [`FeaturePipeline`] holds that step list as configuration and runs it with
//! a plain driver loop; the individual steps live in [`transforms`].

pub mod encoder;
pub mod transforms;

pub use encoder::OneHotEncoder;

use crate::data::columns;
use crate::error::{AbaloneError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Name of the column the trainer consumes as ground truth.
pub const LABEL_COLUMN: &str = "Label";

/// Fixed transform sequence from raw records to the feature matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturePipeline {
    target_column: String,
    label_column: String,
    encoder: OneHotEncoder,
    input_columns: Vec<String>,
    feature_columns: Vec<String>,
    is_fitted: bool,
}

impl FeaturePipeline {
    /// The pipeline configuration for the abalone dataset.
    ///
    /// ShuckedWeight and VisceraWeight are left out of the feature set: both
    /// require opening the shell, and the point is to predict age from
    /// measures that are quick to take. Sex stays in even though it is hard
    /// to determine in the field.
    pub fn for_abalone() -> Self {
        Self {
            target_column: columns::AGE.to_string(),
            label_column: LABEL_COLUMN.to_string(),
            encoder: OneHotEncoder::new(columns::SEX),
            input_columns: vec![
                columns::SEX.to_string(),
                columns::LENGTH.to_string(),
                columns::DIAMETER.to_string(),
                columns::HEIGHT.to_string(),
                columns::WHOLE_WEIGHT.to_string(),
                columns::SHELL_WEIGHT.to_string(),
            ],
            feature_columns: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit the stateful steps and resolve the final feature layout.
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.encoder.fit(df)?;

        self.feature_columns = self
            .input_columns
            .iter()
            .flat_map(|column| {
                if column == self.encoder.column() {
                    self.encoder.output_columns()
                } else {
                    vec![column.clone()]
                }
            })
            .collect();

        self.is_fitted = true;
        Ok(self)
    }

    /// Run the transform steps, in order, over a frame.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(AbaloneError::ModelNotFitted);
        }

        let steps: Vec<Box<dyn Fn(&DataFrame) -> Result<DataFrame> + '_>> = vec![
            Box::new(|df| transforms::copy_column(df, &self.target_column, &self.label_column)),
            Box::new(|df| self.encoder.transform(df)),
        ];

        steps
            .iter()
            .try_fold(df.clone(), |frame, step| step(&frame))
    }

    /// Transform a frame and concatenate the configured columns into the
    /// feature matrix.
    pub fn features(&self, df: &DataFrame) -> Result<Array2<f64>> {
        let transformed = self.transform(df)?;
        transforms::concatenate(&transformed, &self.feature_columns)
    }

    /// Extract the label vector from a transformed frame.
    pub fn labels(&self, transformed: &DataFrame) -> Result<Vec<f64>> {
        transforms::column_values(transformed, &self.label_column)
    }

    /// Final feature layout, resolved at fit time.
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}
