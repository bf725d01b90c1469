use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnounceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template name must not be blank")]
    EmptyTemplateName,

    #[error("Invalid template library: {0}")]
    InvalidLibrary(String),
}
