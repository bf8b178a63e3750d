use std::path::{Path, PathBuf};

/// One classified line of external tool output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Renamed {
        dry_run: bool,
        from: PathBuf,
        to: PathBuf,
    },
    Skipped {
        path: PathBuf,
        reason: String,
    },
    Reverted {
        dry_run: bool,
        from: PathBuf,
        to: PathBuf,
    },
    AccessDenied {
        path: PathBuf,
    },
    Deleted {
        dry_run: bool,
        path: PathBuf,
    },
    Unrecognized {
        line: String,
    },
}

impl OutputEvent {
    /// Path the tool acted on, for events that change the filesystem
    pub fn affected_path(&self) -> Option<&Path> {
        match self {
            OutputEvent::Renamed { to, .. } | OutputEvent::Reverted { to, .. } => Some(to),
            OutputEvent::Deleted { path, .. } => Some(path),
            OutputEvent::Skipped { .. }
            | OutputEvent::AccessDenied { .. }
            | OutputEvent::Unrecognized { .. } => None,
        }
    }
}

/// Events of one invocation plus the files it acted on.
///
/// `affected_files` is `None` when no line produced a file-bearing event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub events: Vec<OutputEvent>,
    pub affected_files: Option<Vec<PathBuf>>,
}

impl Classification {
    pub fn affected_count(&self) -> usize {
        self.affected_files.as_ref().map_or(0, Vec::len)
    }

    pub fn access_denied(&self) -> impl Iterator<Item = &Path> {
        self.events.iter().filter_map(|e| match e {
            OutputEvent::AccessDenied { path } => Some(path.as_path()),
            _ => None,
        })
    }
}
