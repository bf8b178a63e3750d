mod codes;

pub use codes::ExitCode;

use crate::config::{default_config_path, ConfigError};
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("No files to process")]
    NoFiles { ignored: usize },

    #[error("Failed to read selection: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Config(_) => ExitCode::ConfigError,
            AppError::PathNotFound { .. } => ExitCode::PathNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PathNotFound,
            AppError::NoFiles { .. } => ExitCode::NoFiles,
            AppError::Prompt(_) => ExitCode::PromptError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::MissingSection(section)) => {
                format!(
                    "The configuration has no [{}] section.\n\n\
                     Add a \"{}\" entry with \"format\" and \"db\" keys to the\n\
                     configuration file and try again.",
                    section, section
                )
            }

            AppError::Config(ConfigError::NotFound(path)) => {
                let mut msg = format!("Configuration file not found:\n  {}\n\n", path.display());
                msg.push_str("Create it, or point to another file with --config or FLAPPER_CONFIG.");
                if let Ok(default) = default_config_path() {
                    msg.push_str(&format!("\nDefault location: {}", default.display()));
                }
                msg
            }

            AppError::Config(err) => {
                format!("{}\n\nFix the configuration file and try again.", err)
            }

            AppError::PathNotFound { path } => {
                format!(
                    "The specified path does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::NoFiles { ignored } => {
                let mut msg = String::from("No files found to process.");
                if *ignored > 0 {
                    msg.push_str(&format!(
                        "\n{} file(s) were excluded by ignore patterns.",
                        ignored
                    ));
                }
                msg
            }

            AppError::Prompt(err) => {
                format!(
                    "Could not read a selection: {}\n\n\
                     Run without --prompt when input is not interactive.",
                    err
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::PathNotFound { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::WalkError(e) => AppError::Other(format!("Failed to scan: {}", e)),
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Section;

    #[test]
    fn test_exit_codes() {
        let err = AppError::Config(ConfigError::MissingSection(Section::Tv));
        assert_eq!(err.exit_code(), ExitCode::ConfigError);

        let err = AppError::NoFiles { ignored: 0 };
        assert_eq!(err.exit_code(), ExitCode::NoFiles);

        let err = AppError::PermissionDenied {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PathNotFound);
    }

    #[test]
    fn test_missing_section_names_section() {
        let err = AppError::Config(ConfigError::MissingSection(Section::Anime));
        let msg = err.detailed_message();
        assert!(msg.contains("[anime]"));
        assert!(msg.contains("\"anime\""));
    }

    #[test]
    fn test_no_files_mentions_ignored() {
        let msg = AppError::NoFiles { ignored: 3 }.detailed_message();
        assert!(msg.contains("No files found"));
        assert!(msg.contains("3 file(s) were excluded"));
    }

    #[test]
    fn test_scanner_error_conversion() {
        let scanner_err = ScannerError::PathNotFound(PathBuf::from("/missing"));
        let app_err: AppError = scanner_err.into();
        assert_eq!(app_err.exit_code(), ExitCode::PathNotFound);
    }
}
