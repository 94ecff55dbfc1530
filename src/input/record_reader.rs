//! Record parsing from supported file formats

use crate::error::{Result, SkillMatchError};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

pub trait RecordReader {
    fn read(&self, path: &Path) -> impl std::future::Future<Output = Result<Value>> + Send;
}

pub struct JsonRecordReader;

impl RecordReader for JsonRecordReader {
    async fn read(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).await?;

        serde_json::from_str(&content).map_err(|e| {
            SkillMatchError::InvalidInput(format!("Failed to parse JSON '{}': {}", path.display(), e))
        })
    }
}

/// Reads TOML and converts it to the same JSON value model the normalizers use.
pub struct TomlRecordReader;

impl RecordReader for TomlRecordReader {
    async fn read(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).await?;

        let table: toml::Value = toml::from_str(&content).map_err(|e| {
            SkillMatchError::InvalidInput(format!("Failed to parse TOML '{}': {}", path.display(), e))
        })?;

        Ok(serde_json::to_value(table)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_json_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        std::fs::write(&path, r#"{"title": "Rust Engineer", "skills": ["Rust"]}"#).unwrap();

        let value = JsonRecordReader.read(&path).await.unwrap();
        assert_eq!(value["title"], "Rust Engineer");
    }

    #[tokio::test]
    async fn test_toml_reader_produces_json_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        std::fs::write(
            &path,
            "title = \"Data Engineer\"\n\n[[skills]]\nname = \"SQL\"\nimportance = 0.9\nrequired = true\n",
        )
        .unwrap();

        let value = TomlRecordReader.read(&path).await.unwrap();
        assert_eq!(value["skills"][0]["name"], "SQL");
        assert_eq!(value["skills"][0]["importance"].as_f64(), Some(0.9));
        assert_eq!(value["skills"][0]["required"], true);
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"title\": ").unwrap();

        let err = JsonRecordReader.read(&path).await.unwrap_err();
        assert!(matches!(err, SkillMatchError::InvalidInput(_)));
    }
}
