//! Model serialization
//!
//! Writes trained models to disk inside a small envelope: magic bytes,
//! format version, metadata, bincode payload, and an FNV-1a checksum that is
//! verified on load. A JSON variant exists for human inspection.

use crate::error::{AbaloneError, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Metadata stored alongside a serialized model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub version: String,
    /// Training timestamp (ISO 8601)
    pub trained_at: String,
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub model_type: String,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            name: "model".to_string(),
            version: "1.0.0".to_string(),
            trained_at: String::new(),
            feature_names: Vec::new(),
            target_name: "target".to_string(),
            model_type: "unknown".to_string(),
        }
    }
}

impl ModelMetadata {
    /// Create new metadata, stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trained_at: Utc::now().to_rfc3339(),
            ..Default::default()
        }
    }

    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_type = model_type.into();
        self
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.feature_names = features;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_name = target.into();
        self
    }
}

/// On-disk envelope around a serialized model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Magic bytes for format detection
    pub magic: [u8; 4],
    /// Format version
    pub format_version: u32,
    pub metadata: ModelMetadata,
    /// Serialized model payload
    pub model_data: Vec<u8>,
    /// Checksum for integrity verification
    pub checksum: u64,
}

impl SerializedModel {
    const MAGIC: [u8; 4] = *b"ABLM";
    const VERSION: u32 = 1;

    pub fn new(metadata: ModelMetadata, model_data: Vec<u8>) -> Self {
        let checksum = Self::compute_checksum(&model_data);
        Self {
            magic: Self::MAGIC,
            format_version: Self::VERSION,
            metadata,
            model_data,
            checksum,
        }
    }

    /// FNV-1a over the payload.
    fn compute_checksum(data: &[u8]) -> u64 {
        const FNV_OFFSET: u64 = 14695981039346656037;
        const FNV_PRIME: u64 = 1099511628211;

        let mut hash = FNV_OFFSET;
        for byte in data {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }

    pub fn verify_checksum(&self) -> bool {
        Self::compute_checksum(&self.model_data) == self.checksum
    }

    fn validate(&self) -> Result<()> {
        if self.magic != Self::MAGIC {
            return Err(AbaloneError::SerializationError(
                "not a model file (bad magic bytes)".to_string(),
            ));
        }
        if self.format_version != Self::VERSION {
            return Err(AbaloneError::SerializationError(format!(
                "unsupported model format version {}",
                self.format_version
            )));
        }
        if !self.verify_checksum() {
            return Err(AbaloneError::SerializationError(
                "checksum verification failed - file may be corrupted".to_string(),
            ));
        }
        Ok(())
    }
}

/// Save a serializable model to file, overwriting any existing artifact.
pub fn save_model<M: Serialize>(
    model: &M,
    path: impl AsRef<Path>,
    metadata: ModelMetadata,
) -> Result<()> {
    let model_data = bincode::serialize(model)
        .map_err(|e| AbaloneError::SerializationError(format!("Failed to serialize: {}", e)))?;

    let serialized = SerializedModel::new(metadata, model_data);

    let file = File::create(path.as_ref()).map_err(|e| {
        AbaloneError::DataError(format!(
            "Failed to create {}: {e}",
            path.as_ref().display()
        ))
    })?;
    let writer = BufWriter::new(file);

    bincode::serialize_into(writer, &serialized)
        .map_err(|e| AbaloneError::SerializationError(format!("Failed to write: {}", e)))?;

    Ok(())
}

/// Load a model and its metadata from file.
pub fn load_model<M: DeserializeOwned>(path: impl AsRef<Path>) -> Result<(M, ModelMetadata)> {
    let file = File::open(path.as_ref()).map_err(|e| {
        AbaloneError::DataError(format!("Failed to open {}: {e}", path.as_ref().display()))
    })?;
    let reader = BufReader::new(file);

    let serialized: SerializedModel = bincode::deserialize_from(reader)
        .map_err(|e| AbaloneError::SerializationError(format!("Failed to deserialize: {}", e)))?;

    serialized.validate()?;

    let model: M = bincode::deserialize(&serialized.model_data).map_err(|e| {
        AbaloneError::SerializationError(format!("Failed to deserialize model: {}", e))
    })?;

    Ok((model, serialized.metadata))
}

/// Save a model as a JSON envelope.
pub fn save_model_json<M: Serialize>(
    model: &M,
    path: impl AsRef<Path>,
    metadata: ModelMetadata,
) -> Result<()> {
    #[derive(Serialize)]
    struct JsonModel<'a, M: Serialize> {
        metadata: &'a ModelMetadata,
        model: &'a M,
    }

    let json_model = JsonModel {
        metadata: &metadata,
        model,
    };

    let file = File::create(path.as_ref()).map_err(|e| {
        AbaloneError::DataError(format!(
            "Failed to create {}: {e}",
            path.as_ref().display()
        ))
    })?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &json_model)
        .map_err(|e| AbaloneError::SerializationError(format!("Failed to write JSON: {}", e)))?;

    Ok(())
}

/// Load a model from a JSON envelope.
pub fn load_model_json<M: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<(M, ModelMetadata)> {
    #[derive(Deserialize)]
    struct JsonModel<M> {
        metadata: ModelMetadata,
        model: M,
    }

    let file = File::open(path.as_ref()).map_err(|e| {
        AbaloneError::DataError(format!("Failed to open {}: {e}", path.as_ref().display()))
    })?;
    let reader = BufReader::new(file);

    let json_model: JsonModel<M> = serde_json::from_reader(reader)
        .map_err(|e| AbaloneError::SerializationError(format!("Failed to read JSON: {}", e)))?;

    Ok((json_model.model, json_model.metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestModel {
        weights: Vec<f64>,
        bias: f64,
    }

    fn test_model() -> TestModel {
        TestModel {
            weights: vec![1.0, 2.0, 3.0],
            bias: 0.5,
        }
    }

    #[test]
    fn test_checksum_roundtrip() {
        let serialized = SerializedModel::new(ModelMetadata::new("test"), vec![1, 2, 3, 4, 5]);
        assert!(serialized.verify_checksum());
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let mut serialized =
            SerializedModel::new(ModelMetadata::new("test"), vec![1, 2, 3, 4, 5]);
        serialized.model_data[0] = 99;
        assert!(!serialized.verify_checksum());
        assert!(serialized.validate().is_err());
    }

    #[test]
    fn test_metadata_builder() {
        let metadata = ModelMetadata::new("age_model")
            .with_model_type("random_forest_regressor")
            .with_features(vec!["Length".to_string(), "Height".to_string()])
            .with_target("Label");

        assert_eq!(metadata.name, "age_model");
        assert_eq!(metadata.model_type, "random_forest_regressor");
        assert_eq!(metadata.feature_names.len(), 2);
        assert_eq!(metadata.target_name, "Label");
        assert!(!metadata.trained_at.is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let model = test_model();
        save_model(&model, &path, ModelMetadata::new("test")).unwrap();

        let (restored, metadata): (TestModel, ModelMetadata) = load_model(&path).unwrap();
        assert_eq!(restored, model);
        assert_eq!(metadata.name, "test");
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        save_model(&test_model(), &path, ModelMetadata::new("first")).unwrap();
        save_model(&test_model(), &path, ModelMetadata::new("second")).unwrap();

        let (_, metadata): (TestModel, ModelMetadata) = load_model(&path).unwrap();
        assert_eq!(metadata.name, "second");
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let model = test_model();
        save_model_json(&model, &path, ModelMetadata::new("test")).unwrap();

        let (restored, _): (TestModel, ModelMetadata) = load_model_json(&path).unwrap();
        assert_eq!(restored, model);
    }
}
