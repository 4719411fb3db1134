use super::error::ToolError;
use serde::Deserialize;
use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// A service that rewrites a structure file into a normalized form.
pub trait LineNormalizer {
    /// Standardizes record formatting of `input`, writing the result to `output`.
    fn tidy(&self, input: &Path, output: &Path) -> Result<(), ToolError>;

    /// Clears occupancy information of `input`, writing the result to `output`.
    fn delocc(&self, input: &Path, output: &Path) -> Result<(), ToolError>;
}

/// An external program plus fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub(crate) fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    /// Runs the command with `input` as its final argument and its standard output
    /// redirected into `output`.
    ///
    /// # Arguments
    ///
    /// * `input` - The file handed to the program as its last argument.
    /// * `output` - The file receiving the program's standard output.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Spawn`] if the program cannot be started and
    /// [`ToolError::Failed`] if it exits unsuccessfully. In both cases `output` is
    /// removed again.
    pub fn run_to_file(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        let file = File::create(output).map_err(|e| ToolError::io(output, e))?;
        debug!("Running {} {:?} {:?}", self.program, self.args, input);

        let result = match self
            .command()
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .output()
        {
            Ok(result) => result,
            Err(e) => {
                discard(output);
                return Err(ToolError::Spawn {
                    program: self.program.clone(),
                    source: e,
                });
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            warn!("'{}' failed on {:?}: {}", self.program, input, stderr);
            discard(output);
            return Err(ToolError::Failed {
                program: self.program.clone(),
                status: result.status,
                stderr,
            });
        }
        if !output.is_file() {
            return Err(ToolError::OutputMissing(
                output.to_string_lossy().to_string(),
            ));
        }
        Ok(())
    }
}

fn discard(output: &Path) {
    if let Err(e) = fs::remove_file(output) {
        debug!("Could not remove {:?}: {}", output, e);
    }
}

/// Runs the pdb-tools `pdb_tidy` and `pdb_delocc` executables, or any other
/// programs following the same `program [args...] <input>` to stdout convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubprocessNormalizer {
    pub tidy: CommandSpec,
    pub delocc: CommandSpec,
}

impl Default for SubprocessNormalizer {
    fn default() -> Self {
        Self {
            tidy: CommandSpec::new("pdb_tidy"),
            delocc: CommandSpec::new("pdb_delocc"),
        }
    }
}

impl LineNormalizer for SubprocessNormalizer {
    fn tidy(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        self.tidy.run_to_file(input, output)
    }

    fn delocc(&self, input: &Path, output: &Path) -> Result<(), ToolError> {
        self.delocc.run_to_file(input, output)
    }
}
