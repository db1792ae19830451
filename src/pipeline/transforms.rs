//! Pure column transforms
//!
//! Each function maps a frame to a new frame (or matrix) without touching
//! shared state. A missing column, a null cell or a non-finite cell is an
//! immediate error; no transform substitutes defaults.

use crate::error::{AbaloneError, Result};
use ndarray::Array2;
use polars::prelude::*;

/// Duplicate `from` under the name `to`, keeping the original.
pub fn copy_column(df: &DataFrame, from: &str, to: &str) -> Result<DataFrame> {
    let mut series = df
        .column(from)
        .map_err(|_| AbaloneError::FeatureNotFound(from.to_string()))?
        .as_materialized_series()
        .clone();
    series.rename(to.into());

    let mut result = df.clone();
    result
        .with_column(series)
        .map_err(|e| AbaloneError::PreprocessingError(e.to_string()))?;
    Ok(result)
}

/// Concatenate the named columns into a row-major feature matrix.
pub fn concatenate(df: &DataFrame, columns: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();

    let mut col_data: Vec<Vec<f64>> = Vec::with_capacity(columns.len());
    for name in columns {
        col_data.push(column_values(df, name)?);
    }

    Ok(Array2::from_shape_fn((n_rows, columns.len()), |(r, c)| {
        col_data[c][r]
    }))
}

/// Extract one column as finite `f64` values.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .map_err(|_| AbaloneError::FeatureNotFound(name.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| AbaloneError::DataError(e.to_string()))?;

    let ca = series
        .f64()
        .map_err(|e| AbaloneError::DataError(e.to_string()))?;

    let mut values = Vec::with_capacity(ca.len());
    for (row, value) in ca.into_iter().enumerate() {
        let value = value.ok_or_else(|| {
            AbaloneError::PreprocessingError(format!("null value in column {name} at row {row}"))
        })?;
        if !value.is_finite() {
            return Err(AbaloneError::PreprocessingError(format!(
                "non-finite value in column {name} at row {row}"
            )));
        }
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Age".into(), &[15.0, 7.0, 9.0]).into(),
            Series::new("Length".into(), &[0.455, 0.35, 0.53]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_copy_column_preserves_values() {
        let result = copy_column(&frame(), "Age", "Label").unwrap();

        assert_eq!(result.width(), 3);
        let label = column_values(&result, "Label").unwrap();
        let age = column_values(&result, "Age").unwrap();
        assert_eq!(label, age);
    }

    #[test]
    fn test_copy_missing_column_fails() {
        let err = copy_column(&frame(), "Rings", "Label").unwrap_err();
        assert!(matches!(err, AbaloneError::FeatureNotFound(_)));
    }

    #[test]
    fn test_concatenate_is_row_major() {
        let x = concatenate(
            &frame(),
            &["Length".to_string(), "Age".to_string()],
        )
        .unwrap();

        assert_eq!(x.shape(), &[3, 2]);
        assert_eq!(x[[0, 0]], 0.455);
        assert_eq!(x[[0, 1]], 15.0);
        assert_eq!(x[[2, 0]], 0.53);
    }

    #[test]
    fn test_concatenate_missing_column_fails() {
        let err = concatenate(&frame(), &["Height".to_string()]).unwrap_err();
        assert!(matches!(err, AbaloneError::FeatureNotFound(_)));
    }

    #[test]
    fn test_null_cell_fails() {
        let df = DataFrame::new(vec![
            Series::new("Length".into(), &[Some(0.455), None, Some(0.53)]).into(),
        ])
        .unwrap();

        let err = column_values(&df, "Length").unwrap_err();
        assert!(err.to_string().contains("null value"));
    }

    #[test]
    fn test_non_finite_cell_fails() {
        let df = DataFrame::new(vec![
            Series::new("Length".into(), &[0.455, f64::NAN]).into(),
        ])
        .unwrap();

        let err = column_values(&df, "Length").unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }
}
