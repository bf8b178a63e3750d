use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::command::{Conflict, Mode, Order};
use crate::config::ENV_CONFIG;
use crate::workflow::Policy;

#[derive(Parser, Debug)]
#[command(name = "flapper")]
#[command(author, version, long_about = None)]
#[command(about = "FileBot wrapper for matching and renaming anime, movies and TV shows")]
#[command(group(ArgGroup::new("mode").multiple(false)))]
pub struct Args {
    /// Files or directories to match
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Anime matching: rename with absolute numbering, then match by season
    #[arg(short, long, group = "mode")]
    pub anime: bool,

    /// Movie matching
    #[arg(short, long, group = "mode")]
    pub movies: bool,

    /// TV matching (default)
    #[arg(long, group = "mode")]
    pub tv: bool,

    /// Clean up leftover files and empty folders
    #[arg(short, long, group = "mode")]
    pub cleanup: bool,

    /// Revert renames made to the given files
    #[arg(long, group = "mode")]
    pub revert: bool,

    /// Test run: show the changes that would be made, change nothing
    #[arg(short, long)]
    pub test: bool,

    /// Test run, then ask whether to continue with the real run
    #[arg(short, long)]
    pub prompt: bool,

    /// Filter expression passed to FileBot (repeatable)
    #[arg(short, long = "filter", value_name = "STRING")]
    pub filters: Vec<String>,

    /// Only match shows or movies with this name (repeatable)
    #[arg(short, long = "name", value_name = "STRING")]
    pub names: Vec<String>,

    /// Configuration file
    #[arg(long, value_name = "PATH", env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Destination of renamed media (default: from configuration)
    #[arg(long, value_name = "PATH")]
    pub dest: Option<PathBuf>,

    /// Print FileBot commands instead of running them
    #[arg(long)]
    pub display: bool,

    /// Override existing files on conflict instead of skipping
    #[arg(long = "override")]
    pub override_conflicts: bool,

    /// Strict matching
    #[arg(long, overrides_with = "non_strict")]
    pub strict: bool,

    /// Non-strict matching (default)
    #[arg(long, overrides_with = "strict")]
    pub non_strict: bool,

    /// Set extended attributes on renamed files
    #[arg(long)]
    pub xattr: bool,

    /// Episode order
    #[arg(long, value_enum, default_value_t = Order::Airdate)]
    pub order: Order,

    /// Print FileBot's output as-is instead of the parsed summary
    #[arg(long)]
    pub raw: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.anime {
            Mode::Anime
        } else if self.movies {
            Mode::Movie
        } else if self.cleanup {
            Mode::Cleanup
        } else if self.revert {
            Mode::Revert
        } else {
            Mode::Tv
        }
    }

    /// Explicit filters followed by one name filter per `--name`
    pub fn filter_expressions(&self) -> Vec<String> {
        self.filters
            .iter()
            .cloned()
            .chain(self.names.iter().map(|name| name_filter(name)))
            .collect()
    }

    pub fn policy(&self) -> Policy {
        Policy {
            preview: self.test,
            interactive: self.prompt,
        }
    }

    pub fn conflict(&self) -> Conflict {
        if self.override_conflicts {
            Conflict::Override
        } else {
            Conflict::Skip
        }
    }
}

fn name_filter(name: &str) -> String {
    format!("n =~ /{}/", name)
}
