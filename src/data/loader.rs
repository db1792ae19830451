//! Dataset file loading

use crate::data::{columns, records_from_frame, Abalone};
use crate::error::{AbaloneError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Loader for the delimited abalone dataset.
///
/// The file carries no header; fields map positionally onto
/// [`columns::SCHEMA`]. Rows that fail to parse, or a file with the wrong
/// column count, abort the load.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    separator: u8,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self { separator: b',' }
    }

    /// Override the field separator.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Load the dataset into records.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<Abalone>> {
        let df = self.read_frame(path.as_ref())?;
        records_from_frame(&df)
    }

    fn read_frame(&self, path: &Path) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| {
            AbaloneError::DataError(format!("cannot open dataset {}: {e}", path.display()))
        })?;

        let parse_opts = CsvParseOptions::default().with_separator(self.separator);

        let df = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(100))
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| AbaloneError::DataError(e.to_string()))?;

        if df.width() != columns::SCHEMA.len() {
            return Err(AbaloneError::DataError(format!(
                "expected {} columns, got {} in {}",
                columns::SCHEMA.len(),
                df.width(),
                path.display()
            )));
        }

        let mut df = df;
        df.set_column_names(columns::SCHEMA)
            .map_err(|e| AbaloneError::DataError(e.to_string()))?;

        Self::cast_numeric_to_f64(&df)
    }

    /// Cast integer and f32 columns to Float64 for consistent processing.
    fn cast_numeric_to_f64(df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();
        for col in df.get_columns() {
            match col.dtype() {
                DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
                | DataType::Float32 => {
                    let casted = col
                        .cast(&DataType::Float64)
                        .map_err(|e| AbaloneError::DataError(e.to_string()))?;
                    result
                        .with_column(casted)
                        .map_err(|e| AbaloneError::DataError(e.to_string()))?;
                }
                _ => {}
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dataset_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_load_maps_positional_columns() {
        let file = dataset_file(
            "M,0.455,0.365,0.095,0.514,0.2245,0.101,0.15,15\n\
             F,0.53,0.42,0.135,0.677,0.2565,0.1415,0.21,9\n",
        );

        let records = DatasetLoader::new().load(file.path()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.sex, "M");
        assert_eq!(first.length, 0.455);
        assert_eq!(first.diameter, 0.365);
        assert_eq!(first.height, 0.095);
        assert_eq!(first.whole_weight, 0.514);
        assert_eq!(first.shucked_weight, 0.2245);
        assert_eq!(first.viscera_weight, 0.101);
        assert_eq!(first.shell_weight, 0.15);
        assert_eq!(first.age, 15.0);

        assert_eq!(records[1].sex, "F");
        assert_eq!(records[1].age, 9.0);
    }

    #[test]
    fn test_row_count_matches_file() {
        let row = "I,0.33,0.255,0.08,0.205,0.0895,0.0395,0.055,7\n";
        let file = dataset_file(&row.repeat(25));

        let records = DatasetLoader::new().load(file.path()).unwrap();
        assert_eq!(records.len(), 25);
    }

    #[test]
    fn test_wrong_column_count_fails() {
        let file = dataset_file("M,0.455,0.365\nF,0.53,0.42\n");

        let err = DatasetLoader::new().load(file.path()).unwrap_err();
        assert!(matches!(err, AbaloneError::DataError(_)));
        assert!(err.to_string().contains("columns"));
    }

    #[test]
    fn test_null_field_fails() {
        let file = dataset_file(
            "M,0.455,0.365,0.095,0.514,0.2245,0.101,0.15,15\n\
             F,0.53,,0.135,0.677,0.2565,0.1415,0.21,9\n",
        );

        let err = DatasetLoader::new().load(file.path()).unwrap_err();
        assert!(matches!(err, AbaloneError::DataError(_)));
    }

    #[test]
    fn test_missing_file_fails() {
        let err = DatasetLoader::new()
            .load("no/such/abalone.data.txt")
            .unwrap_err();
        assert!(err.to_string().contains("cannot open dataset"));
    }

    #[test]
    fn test_custom_separator() {
        let file = dataset_file("M;0.455;0.365;0.095;0.514;0.2245;0.101;0.15;15\n");

        let records = DatasetLoader::new()
            .with_separator(b';')
            .load(file.path())
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].length, 0.455);
    }
}
