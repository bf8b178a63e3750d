use std::io;

use clap::Parser;
use flapper::cli::Args;
use flapper::config::Config;
use flapper::logging;
use flapper::scanner::discover_files;
use flapper::ui::{Ui, UiConfig};
use flapper::workflow::{Outcome, Session, Workflow};
use flapper::{AppError, CommandBuilder, ExitCode, LinePrompt, ProcessExecutor, RunOptions};
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version arrive here too and are not failures
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.into());
        }
    };

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let verbose = args.verbose > 0;
    let mut ui = Ui::new(UiConfig::new(verbose));

    let config = Config::load(args.config.as_deref())?;
    let mode = args.mode();
    config.require(mode)?;

    let discovery = discover_files(&args.paths, &config.ignore)?;
    for ignored in &discovery.ignored {
        info!(path = ?ignored.path, pattern = %ignored.pattern, "Ignored file");
        ui.dim(&format!(
            "Ignoring {} (matches '{}')",
            ignored.path.display(),
            ignored.pattern
        ));
    }

    if discovery.files.is_empty() {
        return Err(AppError::NoFiles {
            ignored: discovery.ignored.len(),
        });
    }

    info!("Found {} files", discovery.files.len());
    for file in &discovery.files {
        debug!("  {}", file.display());
    }

    let options = RunOptions {
        extended_attributes: args.xattr,
        strict_matching: args.strict,
        order: args.order,
        filters: args.filter_expressions(),
        destination: args.dest.clone().unwrap_or_else(|| config.destination.clone()),
        conflict: args.conflict(),
        dry_run: false,
        raw_output_only: args.raw,
    };
    let builder = CommandBuilder::new(&config.binary);

    let session = Session {
        builder: &builder,
        profiles: &config.profiles,
        options: &options,
        policy: args.policy(),
    };

    let mut workflow = Workflow::new(
        session,
        ProcessExecutor::new(args.display),
        LinePrompt::stdio(),
        Ui::new(UiConfig::new(verbose)),
        Box::new(io::stdout()),
    );

    match workflow.run(mode, &discovery.files)? {
        Outcome::Committed(_) | Outcome::Previewed(_) => {}
        Outcome::Stopped => ui.warning("Stopped."),
        Outcome::Reverted => ui.success("First stage reverted."),
        Outcome::RevertFailed => {
            ui.error("Revert failed. Files renamed in the first stage may still be in place.")
        }
        Outcome::Aborted => ui.dim("Nothing more to do."),
    }

    Ok(())
}
