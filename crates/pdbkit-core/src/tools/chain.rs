use super::error::ToolError;
use super::normalizer::CommandSpec;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Stdio};
use tracing::{debug, info};

/// An ordered pipeline of external tools.
///
/// The first command receives the input path as its final argument; every later
/// command reads the previous command's standard output on its standard input,
/// and the last command's standard output is written to the output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolChain {
    commands: Vec<CommandSpec>,
}

impl ToolChain {
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self { commands }
    }

    pub fn then(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn run(&self, input: &Path, output: &Path) -> Result<PathBuf, ToolError> {
        if self.commands.is_empty() {
            return Err(ToolError::EmptyChain);
        }
        let mut sink = Some(File::create(output).map_err(|e| ToolError::io(output, e))?);

        let last = self.commands.len() - 1;
        let mut children: Vec<(&CommandSpec, Child)> = Vec::with_capacity(self.commands.len());
        let mut upstream: Option<ChildStdout> = None;

        for (i, spec) in self.commands.iter().enumerate() {
            let mut command = spec.command();
            if i == 0 {
                command.arg(input).stdin(Stdio::null());
            } else if let Some(stdout) = upstream.take() {
                command.stdin(Stdio::from(stdout));
            }
            let stdout = match sink.take() {
                Some(file) if i == last => Stdio::from(file),
                other => {
                    sink = other;
                    Stdio::piped()
                }
            };
            command.stdout(stdout);

            debug!("Starting pipeline stage {}: {} {:?}", i + 1, spec.program, spec.args);
            let mut child = match command.stderr(Stdio::inherit()).spawn() {
                Ok(child) => child,
                Err(e) => {
                    abort(children);
                    return Err(ToolError::Spawn {
                        program: spec.program.clone(),
                        source: e,
                    });
                }
            };
            upstream = child.stdout.take();
            children.push((spec, child));
        }

        let mut failure = None;
        for (spec, mut child) in children {
            let status = child.wait().map_err(|e| ToolError::Spawn {
                program: spec.program.clone(),
                source: e,
            })?;
            if !status.success() && failure.is_none() {
                failure = Some(ToolError::Failed {
                    program: spec.program.clone(),
                    status,
                    stderr: String::new(),
                });
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        if !output.is_file() {
            return Err(ToolError::OutputMissing(
                output.to_string_lossy().to_string(),
            ));
        }
        info!(
            "Ran {}-stage tool chain on {:?} into {:?}",
            self.commands.len(),
            input,
            output
        );
        Ok(output.to_path_buf())
    }
}

fn abort(children: Vec<(&CommandSpec, Child)>) {
    for (_, mut child) in children {
        let _ = child.kill();
        let _ = child.wait();
    }
}
