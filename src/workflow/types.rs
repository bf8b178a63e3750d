use std::path::PathBuf;

use crate::command::{CommandBuilder, RunOptions};
use crate::config::Profiles;

/// Whether to preview before the real run, and whether to ask in between
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Run with the test action first
    pub preview: bool,
    /// Ask the operator after the preview; implies a preview
    pub interactive: bool,
}

impl Policy {
    pub fn previews(&self) -> bool {
        self.preview || self.interactive
    }
}

/// Everything that stays fixed for one command session
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    pub builder: &'a CommandBuilder,
    pub profiles: &'a Profiles,
    pub options: &'a RunOptions,
    pub policy: Policy,
}

/// How a workflow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The real run finished; `None` when it matched nothing
    Committed(Option<Vec<PathBuf>>),
    /// Only a preview was requested; files it would have touched
    Previewed(Vec<PathBuf>),
    /// The operator chose to stop
    Stopped,
    /// The operator chose to undo the first anime stage
    Reverted,
    /// The undo of the first anime stage failed or restored nothing
    RevertFailed,
    /// Nothing to do: no matches, a failed run, or display mode
    Aborted,
}

/// What a single invocation of the tool produced
#[derive(Debug)]
pub(super) enum Invocation {
    /// Display mode: the command line was printed, nothing ran
    Displayed,
    /// The tool ran; the files it affected, if any
    Completed(Option<Vec<PathBuf>>),
    /// The tool could not be started or exited non-zero
    Failed,
}

/// Result of one stage, before the workflow decides what comes next
#[derive(Debug)]
pub(super) enum StageResult {
    Committed(Option<Vec<PathBuf>>),
    Previewed(Vec<PathBuf>),
    Stopped,
    RevertRequested,
    Aborted,
}

impl StageResult {
    pub(super) fn into_outcome(self) -> Outcome {
        match self {
            StageResult::Committed(files) => Outcome::Committed(files),
            StageResult::Previewed(files) => Outcome::Previewed(files),
            // Revert is only offered where the caller handles it
            StageResult::Stopped | StageResult::RevertRequested => Outcome::Stopped,
            StageResult::Aborted => Outcome::Aborted,
        }
    }
}
