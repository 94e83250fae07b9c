// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::extractors::description::Extraction;
use crate::sql::{Record, LANGUAGE_CODE};
use crate::utils::error::StorageError;

const SQL_FILENAME: &str = "chapter_descriptions.sql";
const SUMMARY_FILENAME: &str = "chapter_descriptions_meta.json";

/// Metadata written next to the exported SQL.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub source: &'a str,
    pub record_count: usize,
    pub language: &'static str,
    pub output_length: usize,
    pub copied_to_clipboard: bool,
    pub extraction_timestamp: String,
    pub records: &'a [Record],
}

impl<'a> RunSummary<'a> {
    pub fn new(source: &'a str, extraction: &'a Extraction) -> Self {
        Self {
            source,
            record_count: extraction.records.len(),
            language: LANGUAGE_CODE,
            output_length: extraction.output.len(),
            copied_to_clipboard: extraction.copied,
            extraction_timestamp: chrono::Utc::now().to_rfc3339(),
            records: &extraction.records,
        }
    }
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the formatted tuples to `chapter_descriptions.sql`
    pub fn save_sql(&self, extraction: &Extraction) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(SQL_FILENAME);

        fs::write(&file_path, extraction.output.as_bytes()).map_err(StorageError::IoError)?;

        tracing::info!("Saved SQL tuples to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves a JSON summary of the run
    pub fn save_summary(&self, summary: &RunSummary) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(SUMMARY_FILENAME);

        let summary_str = serde_json::to_string_pretty(summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, summary_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved run summary to {}", file_path.display());
        Ok(file_path)
    }
}
