mod types;

pub use types::{ConfigError, Profiles};

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::command::Mode;
use crate::scanner::IgnorePattern;
use types::ConfigFile;

/// Environment variable overriding the config file location
pub const ENV_CONFIG: &str = "FLAPPER_CONFIG";
/// Environment variable overriding the external tool binary
pub const ENV_FILEBOT: &str = "FLAPPER_FILEBOT";

/// Session configuration, read once and then only borrowed
#[derive(Debug, Clone)]
pub struct Config {
    pub binary: PathBuf,
    pub destination: PathBuf,
    pub profiles: Profiles,
    pub ignore: Vec<IgnorePattern>,
}

impl Config {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        info!("Loading configuration from {:?}", path);

        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.clone())
            } else {
                ConfigError::Read {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        Self::from_json(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    /// Parse configuration text; the binary may be overridden from the environment
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;

        let ignore = file
            .ignore
            .iter()
            .map(|(name, pattern)| {
                IgnorePattern::new(name.as_str(), pattern).map_err(|e| ConfigError::InvalidPattern {
                    name: name.clone(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let binary = env::var_os(ENV_FILEBOT)
            .map(PathBuf::from)
            .unwrap_or(file.filebot);

        debug!(binary = ?binary, ignore = ignore.len(), "Configuration parsed");

        Ok(Self {
            binary,
            destination: file.destination,
            profiles: Profiles {
                anime: file.anime.map(Into::into),
                movie: file.movie.map(Into::into),
                tv: file.tv.map(Into::into),
            },
            ignore,
        })
    }

    /// Fail early if `mode` needs a profile the file does not define
    pub fn require(&self, mode: Mode) -> Result<(), ConfigError> {
        for section in mode.required_sections() {
            self.profiles.get(*section)?;
        }
        Ok(())
    }
}

/// `<user config dir>/flapper/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("flapper").join("config.json"))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Profile, Section};
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Serializes tests that read or write FLAPPER_FILEBOT
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    const FULL: &str = r#"{
        "filebot": "/opt/filebot/filebot.sh",
        "destination": "/media",
        "anime": { "format": "{n} - {absolute}", "db": "AniDB" },
        "movie": { "format": "Movies/{ny}/{ny}", "db": "TheMovieDB" },
        "tv": { "format": "TV/{n}/{s00e00} - {t}", "db": "TheTVDB" },
        "ignore": { "samples": "sample", "subtitles": "\\.srt$" }
    }"#;

    #[test]
    fn test_parse_full_config() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();
        env::remove_var(ENV_FILEBOT);

        let config = Config::from_json(FULL).unwrap();

        assert_eq!(config.binary, PathBuf::from("/opt/filebot/filebot.sh"));
        assert_eq!(config.destination, PathBuf::from("/media"));
        assert_eq!(
            config.profiles.get(Section::Anime).unwrap(),
            &Profile::new(Some("{n} - {absolute}".to_string()), Some("AniDB".to_string()))
        );
        assert_eq!(config.ignore.len(), 2);
        assert_eq!(config.ignore[0].name, "samples");
    }

    #[test]
    fn test_defaults() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();
        env::remove_var(ENV_FILEBOT);

        let config = Config::from_json(r#"{ "tv": { "db": "TheTVDB" } }"#).unwrap();

        assert_eq!(config.binary, PathBuf::from("filebot"));
        assert_eq!(config.destination, PathBuf::from("./"));
        assert!(config.ignore.is_empty());
        assert!(config.profiles.get(Section::Tv).unwrap().format.is_none());
    }

    #[test]
    fn test_binary_env_override() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();
        env::set_var(ENV_FILEBOT, "/usr/local/bin/filebot");

        let config = Config::from_json(FULL).unwrap();
        assert_eq!(config.binary, PathBuf::from("/usr/local/bin/filebot"));

        env::remove_var(ENV_FILEBOT);
    }

    #[test]
    fn test_require_sections_per_mode() {
        let config = Config::from_json(r#"{ "tv": {} }"#).unwrap();

        assert!(config.require(Mode::Tv).is_ok());
        assert!(config.require(Mode::Cleanup).is_ok());
        assert!(config.require(Mode::Revert).is_ok());
        assert!(matches!(
            config.require(Mode::Anime),
            Err(ConfigError::MissingSection(Section::Anime))
        ));
        assert!(matches!(
            config.require(Mode::Movie),
            Err(ConfigError::MissingSection(Section::Movie))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = Config::from_json(r#"{ "ignore": { "broken": "(oops" } }"#);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { name, .. }) if name == "broken"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Config::from_json(r#"{ "tvv": {} }"#);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        match Config::load(Some(&path)) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }
}
