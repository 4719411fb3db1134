use crate::core::records::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Transform table '{path}' has {found} numeric rows, expected 3")]
    MissingRows { path: String, found: usize },

    #[error("Transform table '{path}', line {line}: expected 4 or 5 columns, found {found}")]
    InvalidRow {
        path: String,
        line: usize,
        found: usize,
    },

    #[error(transparent)]
    Record(#[from] RecordError),
}
