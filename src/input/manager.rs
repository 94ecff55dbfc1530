//! Input manager for loading profile and job records from files

use crate::error::{Result, SkillMatchError};
use crate::input::file_detector::FileType;
use crate::input::record_reader::{JsonRecordReader, RecordReader, TomlRecordReader};
use crate::processing::record::{normalize_job, normalize_profile, Job, Profile};
use log::info;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, Value>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a raw record from a JSON or TOML file
    pub async fn load_record(&mut self, path: &Path) -> Result<Value> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                info!("Using cached record for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(SkillMatchError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let record = match self.detect_file_type(path)? {
            FileType::Json => {
                info!("Reading JSON record: {}", path.display());
                JsonRecordReader.read(path).await?
            }
            FileType::Toml => {
                info!("Reading TOML record: {}", path.display());
                TomlRecordReader.read(path).await?
            }
            FileType::Unknown => {
                return Err(SkillMatchError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, record.clone());
        }

        Ok(record)
    }

    pub async fn load_profile(&mut self, path: &Path) -> Result<Profile> {
        let record = self.load_record(path).await?;
        normalize_profile(&record)
    }

    pub async fn load_job(&mut self, path: &Path) -> Result<Job> {
        let record = self.load_record(path).await?;
        normalize_job(&record)
    }

    /// Load every job in a file: a single job object, an array of jobs, or an
    /// object with a `jobs` array.
    pub async fn load_jobs(&mut self, path: &Path) -> Result<Vec<Job>> {
        let record = self.load_record(path).await?;

        match &record {
            Value::Array(entries) => entries.iter().map(normalize_job).collect(),
            Value::Object(map) => match map.get("jobs") {
                Some(Value::Array(entries)) => entries.iter().map(normalize_job).collect(),
                _ => Ok(vec![normalize_job(&record)?]),
            },
            _ => Err(SkillMatchError::InvalidInput(format!(
                "Expected a job object or an array of jobs in {}",
                path.display()
            ))),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| SkillMatchError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
