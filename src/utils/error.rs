// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Markup the walker has no dispatch rule for. Raised instead of
    /// dropping content silently.
    #[error("Unexpected <{tag}> node in {context}")]
    UnexpectedNode { tag: String, context: &'static str },

    #[error("Failed to extract {file}: {source}")]
    Document {
        file: String,
        source: Box<ExtractError>,
    },
}

impl ExtractError {
    /// Tag name of the node that stopped extraction, looking through the
    /// per-document wrapper.
    pub fn offending_tag(&self) -> Option<&str> {
        match self {
            ExtractError::UnexpectedNode { tag, .. } => Some(tag.as_str()),
            ExtractError::Document { source, .. } => source.offending_tag(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Worker task failed: {0}")]
    Task(String),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
