use std::fmt;
use std::path::{Path, PathBuf};

/// Destination that leaves templated paths relative to the tool's own default.
pub const DEFAULT_DESTINATION: &str = "./";

/// Matching mode selected for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Anime,
    Movie,
    Tv,
    Cleanup,
    Revert,
}

impl Mode {
    /// Configuration sections this mode cannot run without
    pub fn required_sections(&self) -> &'static [Section] {
        match self {
            Mode::Anime => &[Section::Anime, Section::Tv],
            Mode::Movie => &[Section::Movie],
            Mode::Tv => &[Section::Tv],
            Mode::Cleanup | Mode::Revert => &[],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Mode::Anime => "Anime",
            Mode::Movie => "Movie",
            Mode::Tv => "TV",
            Mode::Cleanup => "Cleanup",
            Mode::Revert => "Revert",
        }
    }
}

/// Per-category profile section of the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Anime,
    Movie,
    Tv,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Anime => "anime",
            Section::Movie => "movie",
            Section::Tv => "tv",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Episode ordering passed to the external tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Order {
    #[default]
    Airdate,
    Dvd,
    Absolute,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Airdate => "Airdate",
            Order::Dvd => "DVD",
            Order::Absolute => "Absolute",
        }
    }
}

/// How the external tool resolves an already existing destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conflict {
    #[default]
    Skip,
    Override,
}

impl Conflict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Conflict::Skip => "skip",
            Conflict::Override => "override",
        }
    }
}

/// Naming template and metadata source for one media category.
///
/// Either half may be missing, in which case the matching argument is left
/// out and the external tool falls back to its own default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub format: Option<String>,
    pub db: Option<String>,
}

impl Profile {
    pub fn new(format: Option<String>, db: Option<String>) -> Self {
        Self { format, db }
    }
}

/// Options shared by every invocation of one command session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub extended_attributes: bool,
    pub strict_matching: bool,
    pub order: Order,
    pub filters: Vec<String>,
    pub destination: PathBuf,
    pub conflict: Conflict,
    pub dry_run: bool,
    pub raw_output_only: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            extended_attributes: false,
            strict_matching: false,
            order: Order::default(),
            filters: Vec::new(),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            conflict: Conflict::default(),
            dry_run: false,
            raw_output_only: false,
        }
    }
}

impl RunOptions {
    pub fn has_default_destination(&self) -> bool {
        is_default_destination(&self.destination)
    }

    /// Copy of these options with a different destination
    pub fn with_destination(&self, destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            ..self.clone()
        }
    }

    /// Copy of these options for a preview or a real run
    pub fn with_dry_run(&self, dry_run: bool) -> Self {
        Self {
            dry_run,
            ..self.clone()
        }
    }
}

/// `./`, `.` and the empty path all mean "wherever the tool puts it"
pub fn is_default_destination(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new(DEFAULT_DESTINATION)
}

/// Fully assembled argument vector; the binary path is always first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<String>,
    dry_run: bool,
}

impl CommandLine {
    pub(crate) fn new(argv: Vec<String>, dry_run: bool) -> Self {
        Self { argv, dry_run }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Whether this invocation was built as a preview
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"') {
                write!(f, "\"{}\"", arg.replace('"', "\\\""))?;
            } else {
                f.write_str(arg)?;
            }
        }
        Ok(())
    }
}
