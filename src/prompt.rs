//! Numbered-choice confirmation prompt.

use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::debug;

/// Answers the operator can give between a preview and a real run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Continue,
    Revert,
    Stop,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Choice::Continue => "Continue",
            Choice::Revert => "Revert",
            Choice::Stop => "Stop",
        })
    }
}

pub const CONFIRM: &[Choice] = &[Choice::Continue, Choice::Stop];
pub const CONFIRM_OR_REVERT: &[Choice] = &[Choice::Continue, Choice::Revert, Choice::Stop];

pub trait Prompt {
    /// Block until the operator picks one of `choices`.
    ///
    /// Invalid input re-renders the menu. The only error is the input stream
    /// itself failing or closing: end of input returns
    /// [`io::ErrorKind::UnexpectedEof`] instead of asking forever.
    fn ask(&mut self, choices: &[Choice]) -> io::Result<Choice>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn ask(&mut self, choices: &[Choice]) -> io::Result<Choice> {
        (**self).ask(choices)
    }
}

/// Prompt reading from any line source and rendering to any writer
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn render(&mut self, choices: &[Choice]) -> io::Result<()> {
        writeln!(self.output)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }
        write!(self.output, "Select [1-{}]: ", choices.len())?;
        self.output.flush()
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, choices: &[Choice]) -> io::Result<Choice> {
        let mut line = String::new();

        loop {
            self.render(choices)?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a choice was made",
                ));
            }

            match parse_selection(&line, choices.len()) {
                Some(index) => {
                    let choice = choices[index];
                    debug!(choice = %choice, "Operator selected");
                    return Ok(choice);
                }
                None => debug!(input = %line.trim(), "Ignoring invalid selection"),
            }
        }
    }
}

/// 1-based selection to 0-based index, if in range
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}
