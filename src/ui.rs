//! UI module for styled terminal output.
//!
//! Status lines go to stderr so that stdout only carries events and command
//! lines. In verbose mode decorations are skipped; tracing covers them.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,
    pub verbose: bool,
}

impl UiConfig {
    /// Create UI config from environment and args
    pub fn new(verbose: bool) -> Self {
        let colors_enabled = should_use_colors();
        Self {
            colors_enabled,
            verbose,
        }
    }
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    // Check NO_COLOR env (standard: https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    io::stderr().is_terminal()
}

/// Styled output writer
pub struct Ui {
    config: UiConfig,
    writer: Box<dyn Write>,
}

impl Ui {
    /// Create a new UI with stderr output
    pub fn new(config: UiConfig) -> Self {
        Self::with_writer(config, Box::new(io::stderr()))
    }

    /// Create UI with custom writer (for testing)
    pub fn with_writer(config: UiConfig, writer: Box<dyn Write>) -> Self {
        // Set colored crate's global color setting
        if !config.colors_enabled {
            colored::control::set_override(false);
        }

        Self { config, writer }
    }

    /// Print a section header, e.g. the start of a stage
    pub fn section(&mut self, title: &str) {
        if self.config.verbose {
            return;
        }
        let _ = writeln!(self.writer);
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", title.bold());
        } else {
            let _ = writeln!(self.writer, "{}", title);
        }
    }

    /// Print an info message
    pub fn info(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.cyan());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Print a success message with checkmark
    pub fn success(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    /// Print a warning message
    pub fn warning(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), msg.yellow());
        } else {
            let _ = writeln!(self.writer, "! {}", msg);
        }
    }

    /// Print an error message
    pub fn error(&mut self, msg: &str) {
        // Errors shown in both modes
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✗".red().bold(), msg.red());
        } else {
            let _ = writeln!(self.writer, "X {}", msg);
        }
    }

    /// Print a block of text the tool produced, indented and dimmed
    pub fn captured(&mut self, text: &str) {
        // Tool output behind a failure is shown in both modes
        for line in text.lines() {
            if self.config.colors_enabled {
                let _ = writeln!(self.writer, "  {}", line.dimmed());
            } else {
                let _ = writeln!(self.writer, "  {}", line);
            }
        }
    }

    /// Whether status and event lines are styled
    pub fn colors_enabled(&self) -> bool {
        self.config.colors_enabled
    }

    /// Print a dim/muted message
    pub fn dim(&mut self, msg: &str) {
        if self.config.verbose {
            return;
        }
        if self.config.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn create_test_ui(verbose: bool) -> (Ui, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let config = UiConfig {
            colors_enabled: false,
            verbose,
        };
        let ui = Ui::with_writer(config, Box::new(TestWriter(buffer.clone())));
        (ui, buffer)
    }

    #[test]
    fn test_ui_plain_output() {
        let (mut ui, buffer) = create_test_ui(false);
        ui.success("Test success");
        ui.warning("Careful");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("* Test success"));
        assert!(output.contains("! Careful"));
    }

    #[test]
    fn test_ui_reports_color_setting() {
        let (ui, _) = create_test_ui(false);
        assert!(!ui.colors_enabled());
    }

    #[test]
    fn test_ui_verbose_mode_skips_decorations() {
        let (mut ui, buffer) = create_test_ui(true);
        ui.info("Should not appear");
        ui.section("Should not appear");
        ui.dim("Should not appear");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_ui_error_and_captured_shown_in_verbose() {
        let (mut ui, buffer) = create_test_ui(true);
        ui.error("This error should appear");
        ui.captured("error: no such agent\nsecond line");

        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(output.contains("X This error should appear"));
        assert!(output.contains("  error: no such agent\n  second line"));
    }
}
