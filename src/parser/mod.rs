mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::PathBuf;
use tracing::{debug, trace};

// [TEST] Rename [/in/a.mkv] to [/out/A - 01.mkv]
static RENAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(TEST|MOVE)\] Rename \[(.+?)\] to \[(.+)\]$").unwrap());

// Skipped [/in/a.mkv] because [/out/A - 01.mkv] already exists
static SKIP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Skipped \[(.+?)\] because \[(.+)\] already exists$").unwrap());

// [MOVE] Revert [/out/A - 01.mkv] to [/in/a.mkv]
static REVERT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(TEST|MOVE)\] Revert \[(.+?)\] to \[(.+)\]$").unwrap());

// Only the JVM exception text is recognized. Any other wording from the tool
// falls through to Unrecognized.
static ACCESS_DENIED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"java\.nio\.file\.AccessDeniedException: (.+)$").unwrap());

// The tool prints the same line for a preview and a real deletion
static DELETE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Delete (.+)$").unwrap());

type BuildEvent = fn(&Captures<'_>, bool) -> OutputEvent;

struct LineMatcher {
    pattern: &'static Lazy<Regex>,
    build: BuildEvent,
}

/// Tried in order; the first matching pattern wins.
static MATCHERS: [LineMatcher; 5] = [
    LineMatcher {
        pattern: &RENAME_REGEX,
        build: renamed,
    },
    LineMatcher {
        pattern: &SKIP_REGEX,
        build: skipped,
    },
    LineMatcher {
        pattern: &REVERT_REGEX,
        build: reverted,
    },
    LineMatcher {
        pattern: &ACCESS_DENIED_REGEX,
        build: access_denied,
    },
    LineMatcher {
        pattern: &DELETE_REGEX,
        build: deleted,
    },
];

/// Classify captured tool output line by line.
///
/// `dry_run` is the flag the invocation was built with; it is only used for
/// deletions, whose text does not say whether they were a preview.
pub fn classify(output: &str, dry_run: bool) -> Classification {
    let mut events = Vec::new();
    let mut affected: Vec<PathBuf> = Vec::new();

    for line in output.lines().filter(|l| !l.is_empty()) {
        let event = classify_line(line, dry_run);

        if let Some(path) = event.affected_path() {
            affected.push(path.to_path_buf());
        }

        events.push(event);
    }

    debug!(
        events = events.len(),
        affected = affected.len(),
        "Classified tool output"
    );

    Classification {
        events,
        affected_files: if affected.is_empty() {
            None
        } else {
            Some(affected)
        },
    }
}

/// Classify a single line; anything unknown becomes `Unrecognized`
pub fn classify_line(line: &str, dry_run: bool) -> OutputEvent {
    for matcher in &MATCHERS {
        if let Some(captures) = matcher.pattern.captures(line) {
            let event = (matcher.build)(&captures, dry_run);
            trace!(line = %line, event = ?event, "Matched line");
            return event;
        }
    }

    trace!(line = %line, "Unrecognized line");
    OutputEvent::Unrecognized {
        line: line.to_string(),
    }
}

fn is_test_tag(captures: &Captures<'_>) -> bool {
    &captures[1] == "TEST"
}

fn renamed(captures: &Captures<'_>, _dry_run: bool) -> OutputEvent {
    OutputEvent::Renamed {
        dry_run: is_test_tag(captures),
        from: PathBuf::from(&captures[2]),
        to: PathBuf::from(&captures[3]),
    }
}

fn skipped(captures: &Captures<'_>, _dry_run: bool) -> OutputEvent {
    OutputEvent::Skipped {
        path: PathBuf::from(&captures[1]),
        reason: captures[2].to_string(),
    }
}

fn reverted(captures: &Captures<'_>, _dry_run: bool) -> OutputEvent {
    OutputEvent::Reverted {
        dry_run: is_test_tag(captures),
        from: PathBuf::from(&captures[2]),
        to: PathBuf::from(&captures[3]),
    }
}

fn access_denied(captures: &Captures<'_>, _dry_run: bool) -> OutputEvent {
    OutputEvent::AccessDenied {
        path: PathBuf::from(&captures[1]),
    }
}

fn deleted(captures: &Captures<'_>, dry_run: bool) -> OutputEvent {
    OutputEvent::Deleted {
        dry_run,
        path: PathBuf::from(&captures[1]),
    }
}
