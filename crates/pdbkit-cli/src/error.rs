use pdbkit::config::ConfigError;
use pdbkit::core::records::RecordError;
use pdbkit::core::transform::TransformError;
use pdbkit::fetch::FetchError;
use pdbkit::tools::ToolError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Records(#[from] RecordError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
