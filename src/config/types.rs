use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::command::{Profile, Section, DEFAULT_DESTINATION};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Cannot determine the user configuration directory")]
    NoConfigDir,

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing configuration section: {0}")]
    MissingSection(Section),

    #[error("Invalid ignore pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// On-disk shape of the configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    #[serde(default = "default_binary")]
    pub filebot: PathBuf,
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
    pub anime: Option<ProfileSection>,
    pub movie: Option<ProfileSection>,
    pub tv: Option<ProfileSection>,
    #[serde(default)]
    pub ignore: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileSection {
    pub format: Option<String>,
    pub db: Option<String>,
}

impl From<ProfileSection> for Profile {
    fn from(section: ProfileSection) -> Self {
        Profile::new(section.format, section.db)
    }
}

fn default_binary() -> PathBuf {
    PathBuf::from("filebot")
}

fn default_destination() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION)
}

/// Profiles per category; a category missing from the file stays `None`
#[derive(Debug, Clone, Default)]
pub struct Profiles {
    pub anime: Option<Profile>,
    pub movie: Option<Profile>,
    pub tv: Option<Profile>,
}

impl Profiles {
    pub fn get(&self, section: Section) -> Result<&Profile, ConfigError> {
        let profile = match section {
            Section::Anime => &self.anime,
            Section::Movie => &self.movie,
            Section::Tv => &self.tv,
        };
        profile.as_ref().ok_or(ConfigError::MissingSection(section))
    }
}
