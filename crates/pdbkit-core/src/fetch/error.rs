use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Key '{key}' not found in object store")]
    NotFound { key: String },

    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("HTTP error for key '{key}': {source}")]
    Http {
        key: String,
        source: reqwest::Error,
    },

    #[error("Object store returned status {status} for key '{key}'")]
    Status {
        key: String,
        status: reqwest::StatusCode,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid structure '{id}': {reason}")]
    InvalidStructure { id: String, reason: String },

    #[error("Structure '{0}' not found in any source")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
}

impl FetchError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }
}
