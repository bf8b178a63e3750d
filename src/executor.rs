//! Runs assembled command lines against the external renaming tool.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::CommandLine;
use crate::parser::{classify, OutputEvent};

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read output of {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {}", describe_status(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        output: String,
    },
}

impl ExecError {
    /// Output captured before the tool failed, if any
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            ExecError::Failed { output, .. } if !output.trim().is_empty() => Some(output),
            _ => None,
        }
    }
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Classified result of one successful invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationResult {
    pub exit_succeeded: bool,
    pub captured_output: String,
    pub events: Vec<OutputEvent>,
    pub affected_files: Option<Vec<PathBuf>>,
}

impl InvocationResult {
    /// Classify output captured from a zero-status run
    pub fn from_output(output: String, dry_run: bool) -> Self {
        let classification = classify(&output, dry_run);
        Self {
            exit_succeeded: true,
            captured_output: output,
            events: classification.events,
            affected_files: classification.affected_files,
        }
    }
}

/// What came of handing a command line to an executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    /// Display mode: nothing was spawned
    Displayed(CommandLine),
    Completed(InvocationResult),
}

pub trait Executor {
    fn execute(&mut self, command: &CommandLine) -> Result<Execution, ExecError>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, command: &CommandLine) -> Result<Execution, ExecError> {
        (**self).execute(command)
    }
}

/// Spawns the external tool with stdout and stderr merged into one stream
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    display_only: bool,
}

impl ProcessExecutor {
    pub fn new(display_only: bool) -> Self {
        Self { display_only }
    }
}

impl Executor for ProcessExecutor {
    fn execute(&mut self, command: &CommandLine) -> Result<Execution, ExecError> {
        if self.display_only {
            debug!(command = %command, "Display mode, not spawning");
            return Ok(Execution::Displayed(command.clone()));
        }

        let program = command.program().to_string();
        info!(command = %command, "Running external tool");

        let (mut reader, writer) = io::pipe().map_err(|e| ExecError::Spawn {
            program: program.clone(),
            source: e,
        })?;

        let stderr = writer.try_clone().map_err(|e| ExecError::Spawn {
            program: program.clone(),
            source: e,
        })?;

        let mut cmd = Command::new(&program);
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr);

        let mut child = cmd.spawn().map_err(|e| ExecError::Spawn {
            program: program.clone(),
            source: e,
        })?;

        // Our copies of the write end must be closed or the read never ends
        drop(cmd);

        let mut raw = Vec::new();
        let read_result = reader.read_to_end(&mut raw);
        let status = child.wait().map_err(|e| ExecError::Io {
            program: program.clone(),
            source: e,
        })?;
        read_result.map_err(|e| ExecError::Io {
            program: program.clone(),
            source: e,
        })?;

        let output = String::from_utf8_lossy(&raw).to_string();
        debug!(status = ?status.code(), bytes = raw.len(), "External tool finished");

        if !status.success() {
            warn!(status = ?status.code(), "External tool failed");
            return Err(ExecError::Failed {
                program,
                code: status.code(),
                output,
            });
        }

        Ok(Execution::Completed(InvocationResult::from_output(
            output,
            command.is_dry_run(),
        )))
    }
}
