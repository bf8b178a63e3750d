use crate::command::CommandLine;
use crate::parser::OutputEvent;
use colored::Colorize;
use std::io::{self, Write};

/// Print a command line instead of running it (display mode)
pub fn display_command(command: &CommandLine, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "{}", command)
}

/// Print the events of one run, one line each.
///
/// Unrecognized lines are chatter from the tool and are left out; use
/// [`display_raw`] to see everything. With `colors`, skipped lines are
/// yellow and access-denied lines red.
pub fn display_events(events: &[OutputEvent], colors: bool, writer: &mut impl Write) -> io::Result<()> {
    for event in events {
        let Some(line) = format_event(event) else {
            continue;
        };
        match event {
            OutputEvent::Skipped { .. } if colors => writeln!(writer, "{}", line.yellow())?,
            OutputEvent::AccessDenied { .. } if colors => writeln!(writer, "{}", line.red())?,
            _ => writeln!(writer, "{}", line)?,
        }
    }
    Ok(())
}

/// Print captured tool output exactly as received
pub fn display_raw(output: &str, writer: &mut impl Write) -> io::Result<()> {
    write!(writer, "{}", output)?;
    if !output.is_empty() && !output.ends_with('\n') {
        writeln!(writer)?;
    }
    Ok(())
}

pub fn format_event(event: &OutputEvent) -> Option<String> {
    let line = match event {
        OutputEvent::Renamed { dry_run, from, to } => format!(
            "{}{} -> {}",
            test_marker(*dry_run),
            from.display(),
            to.display()
        ),
        OutputEvent::Reverted { dry_run, from, to } => format!(
            "{}revert {} -> {}",
            test_marker(*dry_run),
            from.display(),
            to.display()
        ),
        OutputEvent::Deleted { dry_run, path } => {
            format!("{}delete {}", test_marker(*dry_run), path.display())
        }
        OutputEvent::Skipped { path, reason } => {
            format!("skipped {} ({} already exists)", path.display(), reason)
        }
        OutputEvent::AccessDenied { path } => format!("access denied: {}", path.display()),
        OutputEvent::Unrecognized { .. } => return None,
    };
    Some(line)
}

fn test_marker(dry_run: bool) -> &'static str {
    if dry_run {
        "[test] "
    } else {
        ""
    }
}

/// One-line outcome of a stage
pub fn summary(affected: usize, dry_run: bool) -> String {
    match (affected, dry_run) {
        (0, _) => "No files matched.".to_string(),
        (n, true) => format!("{} file(s) would be affected.", n),
        (n, false) => format!("{} file(s) affected.", n),
    }
}
