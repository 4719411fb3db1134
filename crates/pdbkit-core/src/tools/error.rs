use std::io;
use std::path::Path;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },

    #[error("Tool did not produce output file '{0}'")]
    OutputMissing(String),

    #[error("Tool chain has no commands")]
    EmptyChain,
}

impl ToolError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }
}
