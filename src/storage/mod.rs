// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::utils::error::StorageError;
use crate::wiki::Document;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path a document with this page id is written to: `<base>/<page_id>.json`.
    pub fn document_path(&self, page_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", page_id))
    }

    /// Writes the document as pretty JSON with keys sorted at every level.
    pub fn save_document(&self, document: &Document) -> Result<PathBuf, StorageError> {
        let file_path = self.document_path(document.page_id());

        // Page ids such as "Aang/Gallery" need their sub-directory.
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(StorageError::IoError)?;
            }
        }

        let serialized = to_sorted_json(document)?;
        fs::write(&file_path, serialized)
            .map_err(StorageError::IoError)?;

        tracing::info!("Writing {}", file_path.display());

        Ok(file_path)
    }
}

/// serde_json's `Value` keeps objects in a BTreeMap, so going through it
/// orders keys lexicographically.
pub fn to_sorted_json(document: &Document) -> Result<String, StorageError> {
    let value = serde_json::to_value(document)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;
    serde_json::to_string_pretty(&value)
        .map_err(|e| StorageError::SerializationError(e.to_string()))
}
