use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("Parse error on line {line}: invalid coordinate in columns {columns} (value: '{value}')")]
    InvalidCoordinate {
        line: usize,
        columns: &'static str,
        value: String,
    },

    #[error("Output file was not created: '{0}'")]
    OutputMissing(String),

    #[error("Chain list '{chains}' and rename list '{rename}' must have the same length")]
    RenameLengthMismatch { chains: String, rename: String },
}

impl RecordError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }
}
