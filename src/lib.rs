pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod scanner;
pub mod ui;
pub mod workflow;

pub use command::{CommandBuilder, CommandLine, Conflict, Mode, Order, Profile, RunOptions};
pub use config::{Config, ConfigError, Profiles};
pub use error::{AppError, ExitCode};
pub use executor::{ExecError, Execution, Executor, InvocationResult, ProcessExecutor};
pub use parser::{classify, classify_line, Classification, OutputEvent};
pub use prompt::{Choice, LinePrompt, Prompt};
pub use scanner::{discover_files, Discovery, IgnorePattern, IgnoredFile, ScannerError};
pub use workflow::{Outcome, Policy, Session, Workflow};
