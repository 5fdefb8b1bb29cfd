//! Runs the external Move compiler as a child process.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use move_ide_project::CompilerSection;
use thiserror::Error;

use crate::compiler_output::{parse_compiler_output, ExternalDiagnostic};

#[derive(Debug, Error)]
pub enum CompilerRunError {
    #[error("compiler command '{0}' was not found; set [compiler] command in move-ide.toml")]
    NotFound(String),

    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Captured result of one compiler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl CompilerOutput {
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Diagnostics printed on either stream, stdout first
    pub fn diagnostics(&self) -> Vec<ExternalDiagnostic> {
        let mut diagnostics = parse_compiler_output(&self.stdout);
        diagnostics.extend(parse_compiler_output(&self.stderr));
        diagnostics
    }
}

/// A configured compiler invocation, e.g. `sui move build`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerRunner {
    command: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CompilerRunner {
    pub fn new(command: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    pub fn from_config(config: &CompilerSection) -> Self {
        Self::new(config.command.clone(), config.args.iter().cloned())
    }

    /// Runs the compiler from `dir`, normally the package root
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_owned());
        self
    }

    /// The command line as a user would type it
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the compiler to completion. A non-zero exit is not an error;
    /// check [`CompilerOutput::success`].
    pub fn run(&self) -> Result<CompilerOutput, CompilerRunError> {
        let mut command = Command::new(&self.command);
        command.args(&self.args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        tracing::debug!("Running '{}'", self.command_line());
        let output = command.output().map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => CompilerRunError::NotFound(self.command.clone()),
            _ => CompilerRunError::Spawn {
                command: self.command_line(),
                source,
            },
        })?;

        let output = CompilerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };
        tracing::debug!("'{}' exited with {:?}", self.command, output.exit_code);
        Ok(output)
    }
}
