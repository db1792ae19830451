//! One-hot encoding for the categorical sex column

use crate::error::{AbaloneError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Fitted one-hot encoder for a single string column.
///
/// `fit` learns the distinct categories in first-seen order; `transform`
/// replaces the column with one 0/1 indicator column per learned category,
/// named `{column}_{category}`. The category order is part of the fitted
/// state so the downstream feature layout stays stable between training and
/// inference. A value outside the fitted vocabulary encodes as all zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    column: String,
    categories: Vec<String>,
    is_fitted: bool,
}

impl OneHotEncoder {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            categories: Vec::new(),
            is_fitted: false,
        }
    }

    /// Learn the category vocabulary from the data.
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        let series = self.string_column(df)?;
        let ca = series
            .str()
            .map_err(|e| AbaloneError::PreprocessingError(e.to_string()))?;

        self.categories.clear();
        for val in ca.into_iter().flatten() {
            if !self.categories.iter().any(|c| c == val) {
                self.categories.push(val.to_string());
            }
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Replace the column with its indicator columns.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(AbaloneError::ModelNotFitted);
        }

        let series = self.string_column(df)?;
        let ca = series
            .str()
            .map_err(|e| AbaloneError::PreprocessingError(e.to_string()))?;

        let mut result = df.clone();
        for category in &self.categories {
            let name = format!("{}_{}", self.column, category);
            let values: Vec<f64> = ca
                .into_iter()
                .map(|v| if v == Some(category.as_str()) { 1.0 } else { 0.0 })
                .collect();

            result
                .with_column(Series::new(name.into(), values))
                .map_err(|e| AbaloneError::PreprocessingError(e.to_string()))?;
        }

        let result = result
            .drop(&self.column)
            .map_err(|e| AbaloneError::PreprocessingError(e.to_string()))?;

        Ok(result)
    }

    /// Names of the indicator columns, in fitted order.
    pub fn output_columns(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| format!("{}_{}", self.column, c))
            .collect()
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    fn string_column(&self, df: &DataFrame) -> Result<Series> {
        Ok(df
            .column(&self.column)
            .map_err(|_| AbaloneError::FeatureNotFound(self.column.clone()))?
            .as_materialized_series()
            .clone())
    }
}
