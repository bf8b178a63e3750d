//! Preview, confirm and commit runs of the external tool for each mode.
//!
//! Every mode except anime is a single stage. Anime chains two stages: the
//! files are first renamed with the anime profile in place, then the renamed
//! files are matched again with the TV profile into the destination. Between
//! the two the operator may undo the first stage.

mod types;

pub use types::{Outcome, Policy, Session};

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::command::{Mode, Profile, RunOptions, Section, DEFAULT_DESTINATION};
use crate::error::AppError;
use crate::executor::{Execution, Executor, InvocationResult};
use crate::output::{display_command, display_events, display_raw, summary};
use crate::parser::OutputEvent;
use crate::prompt::{Choice, Prompt, CONFIRM, CONFIRM_OR_REVERT};
use crate::ui::Ui;
use types::{Invocation, StageResult};

/// One build, execute and classify cycle
struct Stage<'s> {
    label: &'static str,
    mode: Mode,
    profile: Option<&'s Profile>,
    options: RunOptions,
    files: &'s [PathBuf],
}

pub struct Workflow<'a, E, P> {
    session: Session<'a>,
    executor: E,
    prompt: P,
    ui: Ui,
    out: Box<dyn Write>,
}

impl<'a, E: Executor, P: Prompt> Workflow<'a, E, P> {
    pub fn new(session: Session<'a>, executor: E, prompt: P, ui: Ui, out: Box<dyn Write>) -> Self {
        Self {
            session,
            executor,
            prompt,
            ui,
            out,
        }
    }

    /// Run the whole workflow for `mode` over `files`
    pub fn run(&mut self, mode: Mode, files: &[PathBuf]) -> Result<Outcome, AppError> {
        info!(mode = ?mode, files = files.len(), policy = ?self.session.policy, "Starting workflow");

        let outcome = match mode {
            Mode::Anime => self.run_anime(files)?,
            Mode::Movie => self.run_single(mode, Some(Section::Movie), files)?,
            Mode::Tv => self.run_single(mode, Some(Section::Tv), files)?,
            Mode::Cleanup | Mode::Revert => self.run_single(mode, None, files)?,
        };

        info!(outcome = ?outcome, "Workflow finished");
        Ok(outcome)
    }

    fn run_single(
        &mut self,
        mode: Mode,
        section: Option<Section>,
        files: &[PathBuf],
    ) -> Result<Outcome, AppError> {
        let profiles = self.session.profiles;
        let profile = section.map(|s| profiles.get(s)).transpose()?;

        let stage = Stage {
            label: mode.description(),
            mode,
            profile,
            options: self.session.options.clone(),
            files,
        };

        Ok(self.run_stage(&stage, CONFIRM)?.into_outcome())
    }

    fn run_anime(&mut self, files: &[PathBuf]) -> Result<Outcome, AppError> {
        let profiles = self.session.profiles;
        let anime = profiles.get(Section::Anime)?;
        let tv = profiles.get(Section::Tv)?;

        let first = Stage {
            label: "Anime (1/2)",
            mode: Mode::Anime,
            profile: Some(anime),
            options: self.session.options.with_destination(DEFAULT_DESTINATION),
            files,
        };

        let renamed = match self.run_stage(&first, CONFIRM)? {
            StageResult::Committed(Some(renamed)) => renamed,
            StageResult::Committed(None) => {
                self.ui.warning("No files were renamed, skipping TV matching.");
                return Ok(Outcome::Aborted);
            }
            other => return Ok(other.into_outcome()),
        };

        let second = Stage {
            label: "TV (2/2)",
            mode: Mode::Tv,
            profile: Some(tv),
            options: self.session.options.clone(),
            files: &renamed,
        };

        match self.run_stage(&second, CONFIRM_OR_REVERT)? {
            StageResult::RevertRequested => self.revert(&renamed),
            StageResult::Stopped => {
                self.ui.warning("Stopped. Files renamed in the first stage were left as they are.");
                Ok(Outcome::Stopped)
            }
            other => Ok(other.into_outcome()),
        }
    }

    /// Undo the first anime stage
    fn revert(&mut self, files: &[PathBuf]) -> Result<Outcome, AppError> {
        let stage = Stage {
            label: "Revert",
            mode: Mode::Revert,
            profile: None,
            options: self.session.options.clone(),
            files,
        };

        match self.invoke(&stage, false)? {
            Invocation::Completed(Some(reverted)) => {
                debug!(reverted = reverted.len(), "Revert finished");
                Ok(Outcome::Reverted)
            }
            other => {
                warn!(result = ?other, "Revert did not restore any files");
                Ok(Outcome::RevertFailed)
            }
        }
    }

    fn run_stage(&mut self, stage: &Stage<'_>, choices: &[Choice]) -> Result<StageResult, AppError> {
        let policy = self.session.policy;

        if policy.previews() {
            let Invocation::Completed(Some(preview)) = self.invoke(stage, true)? else {
                return Ok(StageResult::Aborted);
            };

            if !policy.interactive {
                self.ui.dim("Test run only, no files were changed.");
                return Ok(StageResult::Previewed(preview));
            }

            match self.prompt.ask(choices).map_err(AppError::Prompt)? {
                Choice::Continue => {}
                Choice::Stop => return Ok(StageResult::Stopped),
                Choice::Revert => return Ok(StageResult::RevertRequested),
            }
        }

        match self.invoke(stage, false)? {
            Invocation::Completed(affected) => Ok(StageResult::Committed(affected)),
            Invocation::Displayed | Invocation::Failed => Ok(StageResult::Aborted),
        }
    }

    /// Build, execute and report one invocation
    fn invoke(&mut self, stage: &Stage<'_>, dry_run: bool) -> Result<Invocation, AppError> {
        let options = stage.options.with_dry_run(dry_run);
        let command = self
            .session
            .builder
            .build(stage.mode, &options, stage.profile, stage.files);

        self.ui.section(&format!(
            "{}{}: {} file(s)",
            stage.label,
            if dry_run { " [test]" } else { "" },
            stage.files.len()
        ));

        match self.executor.execute(&command) {
            Ok(Execution::Displayed(command)) => {
                display_command(&command, &mut self.out).map_err(display_error)?;
                Ok(Invocation::Displayed)
            }
            Ok(Execution::Completed(result)) => {
                self.report(&result, &options)?;
                Ok(Invocation::Completed(result.affected_files))
            }
            Err(err) => {
                warn!(error = %err, "Stage aborted");
                self.ui.error(&err.to_string());
                if let Some(output) = err.captured_output() {
                    self.ui.captured(output);
                }
                Ok(Invocation::Failed)
            }
        }
    }

    fn report(&mut self, result: &InvocationResult, options: &RunOptions) -> Result<(), AppError> {
        if options.raw_output_only {
            return display_raw(&result.captured_output, &mut self.out).map_err(display_error);
        }

        let colors = self.ui.colors_enabled();
        display_events(&result.events, colors, &mut self.out).map_err(display_error)?;

        for event in &result.events {
            match event {
                OutputEvent::AccessDenied { path } => {
                    warn!(path = ?path, "Access denied");
                    self.ui.warning(&format!("Access denied: {}", path.display()));
                }
                OutputEvent::Unrecognized { line } => debug!(line = %line, "Tool output"),
                _ => {}
            }
        }

        let affected = result.affected_files.as_ref().map_or(0, Vec::len);
        let line = summary(affected, options.dry_run);
        if affected == 0 {
            self.ui.warning(&line);
        } else if options.dry_run {
            self.ui.info(&line);
        } else {
            self.ui.success(&line);
        }

        Ok(())
    }
}

fn display_error(err: std::io::Error) -> AppError {
    AppError::Other(format!("Failed to display output: {}", err))
}
