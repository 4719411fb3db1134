pub mod config;
pub mod fetch;
pub mod records;
pub mod tools;
pub mod transform;

use crate::error::{CliError, Result};
use std::path::Path;

/// Scanners treat unreadable files as empty, so the CLI checks its inputs up front.
pub(crate) fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::Argument(format!(
            "Input file '{}' does not exist or is not a regular file",
            path.display()
        )))
    }
}
