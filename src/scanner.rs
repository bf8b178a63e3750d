use std::fs;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to resolve path: {0}")]
    IoError(#[from] std::io::Error),
}

/// Named, case-insensitive pattern excluding files from discovery
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    pub name: String,
    regex: Regex,
}

impl IgnorePattern {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            name: name.into(),
            regex,
        })
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.regex.is_match(&path.to_string_lossy())
    }
}

/// A file left out of the run, and the pattern that excluded it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredFile {
    pub path: PathBuf,
    pub pattern: String,
}

#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub ignored: Vec<IgnoredFile>,
}

/// Resolve `roots` into the flat list of files to hand to the external tool.
///
/// Directories are expanded recursively in file-name order; roots keep the
/// order they were given in.
pub fn discover_files(roots: &[PathBuf], ignore: &[IgnorePattern]) -> Result<Discovery, ScannerError> {
    let mut discovery = Discovery::default();

    for root in roots {
        let resolved = resolve(root)?;
        debug!(path = ?resolved, "Scanning path");

        for entry in WalkDir::new(&resolved).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(e, &resolved))?;

            if !entry.file_type().is_file() {
                trace!(path = ?entry.path(), "Skipping non-file");
                continue;
            }

            let path = entry.into_path();

            match ignore.iter().find(|p| p.is_match(&path)) {
                Some(pattern) => {
                    debug!(path = ?path, pattern = %pattern.name, "Ignoring file");
                    discovery.ignored.push(IgnoredFile {
                        path,
                        pattern: pattern.name.clone(),
                    });
                }
                None => {
                    trace!(path = ?path, "Found file");
                    discovery.files.push(path);
                }
            }
        }
    }

    debug!(
        files = discovery.files.len(),
        ignored = discovery.ignored.len(),
        "Scan complete"
    );

    Ok(discovery)
}

fn resolve(root: &Path) -> Result<PathBuf, ScannerError> {
    fs::canonicalize(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScannerError::PathNotFound(root.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => ScannerError::PermissionDenied(root.to_path_buf()),
        _ => ScannerError::IoError(e),
    })
}

fn walk_error(err: walkdir::Error, root: &Path) -> ScannerError {
    if err.io_error().map(|e| e.kind()) == Some(std::io::ErrorKind::PermissionDenied) {
        let path = err.path().unwrap_or(root).to_path_buf();
        return ScannerError::PermissionDenied(path);
    }
    ScannerError::WalkError(err)
}
