mod types;

pub use types::*;

use std::path::PathBuf;
use tracing::debug;

const SCRIPT_CLEANER: &str = "fn:cleaner";
const SCRIPT_REVERT: &str = "fn:revert";

/// Assembles argument vectors for the external renaming tool
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    binary: PathBuf,
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the command line for one invocation.
    ///
    /// `profile` is only consulted for the matching modes; the caller is
    /// responsible for passing the profile that belongs to `mode`.
    pub fn build(
        &self,
        mode: Mode,
        options: &RunOptions,
        profile: Option<&Profile>,
        files: &[PathBuf],
    ) -> CommandLine {
        let mut argv = vec![self.binary.to_string_lossy().to_string()];

        argv.extend(global_args(options));

        let mode_args = match mode {
            Mode::Cleanup => script_args(SCRIPT_CLEANER, files),
            Mode::Revert => script_args(SCRIPT_REVERT, files),
            Mode::Anime | Mode::Movie | Mode::Tv => rename_args(options, profile, files),
        };
        argv.extend(mode_args);

        debug!(mode = ?mode, dry_run = options.dry_run, argv = ?argv, "Built command line");

        CommandLine::new(argv, options.dry_run)
    }
}

fn global_args(options: &RunOptions) -> Vec<String> {
    let mut args = Vec::new();

    if !options.extended_attributes {
        args.push("-no-xattr".to_string());
    }

    if !options.strict_matching {
        args.push("-non-strict".to_string());
    }

    args.push("--order".to_string());
    args.push(options.order.as_str().to_string());

    for filter in &options.filters {
        args.push("--filter".to_string());
        args.push(filter.clone());
    }

    args.push("--action".to_string());
    args.push(if options.dry_run { "test" } else { "move" }.to_string());

    args.push("--conflict".to_string());
    args.push(options.conflict.as_str().to_string());

    args
}

fn script_args(script: &str, files: &[PathBuf]) -> Vec<String> {
    let mut args = vec!["-script".to_string(), script.to_string()];
    args.extend(files.iter().map(|f| f.to_string_lossy().to_string()));
    args
}

fn rename_args(options: &RunOptions, profile: Option<&Profile>, files: &[PathBuf]) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(profile) = profile {
        if let Some(format) = &profile.format {
            args.push("--format".to_string());
            args.push(destination_path(options, format));
        }
        if let Some(db) = &profile.db {
            args.push("--db".to_string());
            args.push(db.clone());
        }
    }

    args.push("-rename".to_string());
    args.extend(files.iter().map(|f| f.to_string_lossy().to_string()));
    args
}

/// Join a templated path onto the destination, unless the destination is the
/// default one, so that the template reads exactly as configured.
fn destination_path(options: &RunOptions, template: &str) -> String {
    if options.has_default_destination() {
        template.to_string()
    } else {
        options.destination.join(template).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files() -> Vec<PathBuf> {
        vec![PathBuf::from("a.mkv"), PathBuf::from("b.mkv")]
    }

    fn tv_profile() -> Profile {
        Profile::new(
            Some("{n}/Season {s}/{n} - {s00e00} - {t}".to_string()),
            Some("TheTVDB".to_string()),
        )
    }

    fn builder() -> CommandBuilder {
        CommandBuilder::new("filebot")
    }

    #[test]
    fn test_default_options() {
        let cmd = builder().build(Mode::Tv, &RunOptions::default(), Some(&tv_profile()), &files());

        assert_eq!(
            cmd.argv(),
            &[
                "filebot",
                "-no-xattr",
                "-non-strict",
                "--order",
                "Airdate",
                "--action",
                "move",
                "--conflict",
                "skip",
                "--format",
                "{n}/Season {s}/{n} - {s00e00} - {t}",
                "--db",
                "TheTVDB",
                "-rename",
                "a.mkv",
                "b.mkv",
            ]
        );
        assert!(!cmd.is_dry_run());
    }

    #[test]
    fn test_binary_is_first() {
        let cmd = CommandBuilder::new("/opt/filebot/filebot.sh").build(
            Mode::Cleanup,
            &RunOptions::default(),
            None,
            &files(),
        );
        assert_eq!(cmd.program(), "/opt/filebot/filebot.sh");
        assert_eq!(cmd.args()[0], "-no-xattr");
    }

    #[test]
    fn test_xattr_and_strict_flags() {
        let options = RunOptions {
            extended_attributes: true,
            strict_matching: true,
            ..RunOptions::default()
        };
        let cmd = builder().build(Mode::Movie, &options, None, &files());

        assert!(!cmd.argv().contains(&"-no-xattr".to_string()));
        assert!(!cmd.argv().contains(&"-non-strict".to_string()));
        assert_eq!(cmd.args()[0], "--order");
    }

    #[test]
    fn test_filters_keep_order() {
        let options = RunOptions {
            filters: vec!["s == 1".to_string(), "n =~ /Show/".to_string()],
            order: Order::Dvd,
            ..RunOptions::default()
        };
        let cmd = builder().build(Mode::Tv, &options, None, &files());
        let argv = cmd.argv();

        let order_at = argv.iter().position(|a| a == "--order").unwrap();
        assert_eq!(argv[order_at + 1], "DVD");
        assert_eq!(argv[order_at + 2], "--filter");
        assert_eq!(argv[order_at + 3], "s == 1");
        assert_eq!(argv[order_at + 4], "--filter");
        assert_eq!(argv[order_at + 5], "n =~ /Show/");
        assert_eq!(argv[order_at + 6], "--action");
    }

    #[test]
    fn test_dry_run_uses_test_action() {
        let options = RunOptions::default().with_dry_run(true);
        let cmd = builder().build(Mode::Tv, &options, None, &files());

        let action_at = cmd.argv().iter().position(|a| a == "--action").unwrap();
        assert_eq!(cmd.argv()[action_at + 1], "test");
        assert!(cmd.is_dry_run());
    }

    #[test]
    fn test_override_conflict() {
        let options = RunOptions {
            conflict: Conflict::Override,
            ..RunOptions::default()
        };
        let cmd = builder().build(Mode::Tv, &options, None, &files());
        let at = cmd.argv().iter().position(|a| a == "--conflict").unwrap();
        assert_eq!(cmd.argv()[at + 1], "override");
    }

    #[test]
    fn test_cleanup_and_revert_use_scripts_not_profiles() {
        let profile = tv_profile();

        for (mode, script) in [(Mode::Cleanup, "fn:cleaner"), (Mode::Revert, "fn:revert")] {
            let cmd = builder().build(mode, &RunOptions::default(), Some(&profile), &files());
            let argv = cmd.argv();

            assert!(!argv.contains(&"--format".to_string()));
            assert!(!argv.contains(&"--db".to_string()));
            assert!(!argv.contains(&"-rename".to_string()));

            let at = argv.iter().position(|a| a == "-script").unwrap();
            assert_eq!(argv[at + 1], script);
            assert_eq!(&argv[at + 2..], &["a.mkv", "b.mkv"]);
        }
    }

    #[test]
    fn test_matching_modes_never_use_scripts() {
        for mode in [Mode::Anime, Mode::Movie, Mode::Tv] {
            let cmd = builder().build(mode, &RunOptions::default(), Some(&tv_profile()), &files());
            assert!(!cmd.argv().contains(&"-script".to_string()));
            assert!(cmd.argv().contains(&"-rename".to_string()));
        }
    }

    #[test]
    fn test_missing_profile_fields_are_omitted() {
        let profile = Profile::new(None, Some("AniDB".to_string()));
        let cmd = builder().build(Mode::Anime, &RunOptions::default(), Some(&profile), &files());
        assert!(!cmd.argv().contains(&"--format".to_string()));
        assert!(cmd.argv().contains(&"AniDB".to_string()));

        let cmd = builder().build(Mode::Anime, &RunOptions::default(), Some(&Profile::default()), &files());
        assert!(!cmd.argv().contains(&"--format".to_string()));
        assert!(!cmd.argv().contains(&"--db".to_string()));
    }

    #[test]
    fn test_destination_prefixes_template_once() {
        let options = RunOptions::default().with_destination("/media/tv");
        let cmd = builder().build(Mode::Tv, &options, Some(&tv_profile()), &files());

        let at = cmd.argv().iter().position(|a| a == "--format").unwrap();
        assert_eq!(
            cmd.argv()[at + 1],
            "/media/tv/{n}/Season {s}/{n} - {s00e00} - {t}"
        );
        assert_eq!(cmd.argv().iter().filter(|a| a.contains("/media/tv")).count(), 1);
    }

    #[test]
    fn test_default_destination_is_not_joined() {
        for dest in ["./", ".", ""] {
            let options = RunOptions::default().with_destination(dest);
            assert!(options.has_default_destination());

            let cmd = builder().build(Mode::Tv, &options, Some(&tv_profile()), &files());
            let at = cmd.argv().iter().position(|a| a == "--format").unwrap();
            assert_eq!(cmd.argv()[at + 1], "{n}/Season {s}/{n} - {s00e00} - {t}");
        }
    }

    #[test]
    fn test_display_quotes_whitespace() {
        let cmd = builder().build(Mode::Tv, &RunOptions::default(), Some(&tv_profile()), &[PathBuf::from("My Show.mkv")]);
        let shown = cmd.to_string();

        assert!(shown.starts_with("filebot -no-xattr -non-strict --order Airdate"));
        assert!(shown.contains("\"{n}/Season {s}/{n} - {s00e00} - {t}\""));
        assert!(shown.ends_with("-rename \"My Show.mkv\""));
    }

    #[test]
    fn test_required_sections() {
        assert_eq!(Mode::Anime.required_sections(), &[Section::Anime, Section::Tv]);
        assert_eq!(Mode::Movie.required_sections(), &[Section::Movie]);
        assert!(Mode::Cleanup.required_sections().is_empty());
        assert!(Mode::Revert.required_sections().is_empty());
    }
}
