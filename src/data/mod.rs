//! Record schema and dataset loading
//!
//! One [`Abalone`] record describes a single specimen's measurements plus its
//! true age (the ring count). During inference the age field is ignored.

mod loader;

pub use loader::DatasetLoader;

use crate::error::{AbaloneError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column names, in dataset order.
pub mod columns {
    pub const SEX: &str = "Sex";
    pub const LENGTH: &str = "Length";
    pub const DIAMETER: &str = "Diameter";
    pub const HEIGHT: &str = "Height";
    pub const WHOLE_WEIGHT: &str = "WholeWeight";
    pub const SHUCKED_WEIGHT: &str = "ShuckedWeight";
    pub const VISCERA_WEIGHT: &str = "VisceraWeight";
    pub const SHELL_WEIGHT: &str = "ShellWeight";
    pub const AGE: &str = "Age";

    /// Positional schema of the dataset file (columns 0-8).
    pub const SCHEMA: [&str; 9] = [
        SEX,
        LENGTH,
        DIAMETER,
        HEIGHT,
        WHOLE_WEIGHT,
        SHUCKED_WEIGHT,
        VISCERA_WEIGHT,
        SHELL_WEIGHT,
        AGE,
    ];
}

/// One input row: measurements of a single specimen.
///
/// Lengths are in millimetres, weights in grams. `sex` is one of
/// `"M"`, `"F"` or `"I"` (infant). `age` is the supervised label and only
/// meaningful during training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Abalone {
    pub sex: String,
    pub length: f64,
    pub diameter: f64,
    pub height: f64,
    pub whole_weight: f64,
    pub shucked_weight: f64,
    pub viscera_weight: f64,
    pub shell_weight: f64,
    pub age: f64,
}

impl Default for Abalone {
    fn default() -> Self {
        Self {
            sex: String::new(),
            length: 0.0,
            diameter: 0.0,
            height: 0.0,
            whole_weight: 0.0,
            shucked_weight: 0.0,
            viscera_weight: 0.0,
            shell_weight: 0.0,
            age: 0.0,
        }
    }
}

/// Predicted age for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgePrediction {
    pub age: f64,
}

/// Assemble records into a column frame using the schema names.
pub fn to_frame(records: &[Abalone]) -> Result<DataFrame> {
    let frame = DataFrame::new(vec![
        Series::new(
            columns::SEX.into(),
            records.iter().map(|r| r.sex.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::LENGTH.into(),
            records.iter().map(|r| r.length).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::DIAMETER.into(),
            records.iter().map(|r| r.diameter).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::HEIGHT.into(),
            records.iter().map(|r| r.height).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::WHOLE_WEIGHT.into(),
            records.iter().map(|r| r.whole_weight).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::SHUCKED_WEIGHT.into(),
            records.iter().map(|r| r.shucked_weight).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::VISCERA_WEIGHT.into(),
            records.iter().map(|r| r.viscera_weight).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::SHELL_WEIGHT.into(),
            records.iter().map(|r| r.shell_weight).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            columns::AGE.into(),
            records.iter().map(|r| r.age).collect::<Vec<_>>(),
        )
        .into(),
    ])?;
    Ok(frame)
}

/// Convert a schema-named frame back into records.
///
/// A null cell in any consumed column is an error; the loader never
/// substitutes defaults for missing values.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<Abalone>> {
    let sex_series = df
        .column(columns::SEX)
        .map_err(|_| AbaloneError::FeatureNotFound(columns::SEX.to_string()))?
        .as_materialized_series()
        .clone();
    let sex = sex_series
        .str()
        .map_err(|e| AbaloneError::DataError(e.to_string()))?;

    let length = numeric_column(df, columns::LENGTH)?;
    let diameter = numeric_column(df, columns::DIAMETER)?;
    let height = numeric_column(df, columns::HEIGHT)?;
    let whole_weight = numeric_column(df, columns::WHOLE_WEIGHT)?;
    let shucked_weight = numeric_column(df, columns::SHUCKED_WEIGHT)?;
    let viscera_weight = numeric_column(df, columns::VISCERA_WEIGHT)?;
    let shell_weight = numeric_column(df, columns::SHELL_WEIGHT)?;
    let age = numeric_column(df, columns::AGE)?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        records.push(Abalone {
            sex: sex
                .get(row)
                .ok_or_else(|| null_cell(columns::SEX, row))?
                .to_string(),
            length: length[row].ok_or_else(|| null_cell(columns::LENGTH, row))?,
            diameter: diameter[row].ok_or_else(|| null_cell(columns::DIAMETER, row))?,
            height: height[row].ok_or_else(|| null_cell(columns::HEIGHT, row))?,
            whole_weight: whole_weight[row]
                .ok_or_else(|| null_cell(columns::WHOLE_WEIGHT, row))?,
            shucked_weight: shucked_weight[row]
                .ok_or_else(|| null_cell(columns::SHUCKED_WEIGHT, row))?,
            viscera_weight: viscera_weight[row]
                .ok_or_else(|| null_cell(columns::VISCERA_WEIGHT, row))?,
            shell_weight: shell_weight[row]
                .ok_or_else(|| null_cell(columns::SHELL_WEIGHT, row))?,
            age: age[row].ok_or_else(|| null_cell(columns::AGE, row))?,
        });
    }

    Ok(records)
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)
        .map_err(|_| AbaloneError::FeatureNotFound(name.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| AbaloneError::DataError(e.to_string()))?;
    let values = series
        .f64()
        .map_err(|e| AbaloneError::DataError(e.to_string()))?
        .into_iter()
        .collect();
    Ok(values)
}

fn null_cell(column: &str, row: usize) -> AbaloneError {
    AbaloneError::DataError(format!("null value in column {column} at row {row}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Abalone {
        Abalone {
            sex: "M".to_string(),
            length: 0.455,
            diameter: 0.365,
            height: 0.095,
            whole_weight: 0.514,
            shucked_weight: 0.2245,
            viscera_weight: 0.101,
            shell_weight: 0.15,
            age: 15.0,
        }
    }

    #[test]
    fn test_frame_roundtrip() {
        let records = vec![
            sample_record(),
            Abalone {
                sex: "I".to_string(),
                age: 7.0,
                ..sample_record()
            },
        ];

        let df = to_frame(&records).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), columns::SCHEMA.len());

        let restored = records_from_frame(&df).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let df = to_frame(&[sample_record()]).unwrap();
        let df = df.drop(columns::HEIGHT).unwrap();

        let err = records_from_frame(&df).unwrap_err();
        assert!(matches!(err, AbaloneError::FeatureNotFound(_)));
    }

    #[test]
    fn test_default_record_has_no_sex() {
        let record = Abalone::default();
        assert!(record.sex.is_empty());
        assert_eq!(record.age, 0.0);
    }
}
