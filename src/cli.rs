//! Command-line interface definition and argument parsing.
//!
//! This module defines the command-line arguments using the
//! [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that
//! config-file values act as defaults that CLI arguments can override
//! (layered config).

use std::path::PathBuf;

use clap::Parser;

use dirsum::config::{FileConfig, expand_tilde};

/// Default percentage threshold when neither the CLI nor the config file
/// provides one.
const DEFAULT_PERCENT: f64 = 1.0;

/// Command-line interface for dirsum.
#[derive(Parser)]
#[command(name = "dirsum")]
#[command(
    about = "Summarize the disk usage of a directory tree, reporting inclusive and exclusive sizes per directory"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Directory to summarize
    ///
    /// Defaults to the current directory when not specified.
    dir: Option<PathBuf>,

    /// Minimum percentage of the total size a directory must reach to be shown
    ///
    /// Directories whose inclusive size is below this percentage of the
    /// root's total are omitted from the report, together with everything
    /// beneath them. A value of 0 or less shows every directory.
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    percent: Option<f64>,

    /// Output the report as a single JSON object for scripting/piping
    ///
    /// When enabled, all human-readable output (colors, progress spinner)
    /// is suppressed and a single JSON document is printed to stdout.
    #[arg(long)]
    json: bool,

    /// Show access errors that occurred while scanning
    ///
    /// When enabled, entries that had to be skipped (permission denied,
    /// vanished files, ...) are listed on stderr after the scan.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable the progress spinner
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve the target directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        if let Some(ref dir) = self.dir {
            return dir.clone();
        }

        if let Some(ref dir) = config.dir {
            return expand_tilde(dir);
        }

        PathBuf::from(".")
    }

    /// Resolve the percentage threshold.
    ///
    /// Priority: CLI argument > config file > default (1.0).
    #[must_use]
    pub fn percent(&self, config: &FileConfig) -> f64 {
        self.percent
            .or(config.percent)
            .unwrap_or(DEFAULT_PERCENT)
    }

    /// Whether per-entry scan diagnostics should be printed.
    ///
    /// The CLI flag (if set) takes priority, then the config file value,
    /// then `false`.
    #[must_use]
    pub fn verbose(&self, config: &FileConfig) -> bool {
        self.verbose || config.verbose.unwrap_or(false)
    }

    /// Whether the progress spinner should be shown.
    ///
    /// `--no-progress` always wins; otherwise the config file value applies,
    /// defaulting to enabled. JSON mode additionally suppresses the spinner
    /// (handled by the caller).
    #[must_use]
    pub fn progress_enabled(&self, config: &FileConfig) -> bool {
        !self.no_progress && config.progress.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["dirsum"]);
        let config = FileConfig::default();

        assert_eq!(args.directory(&config), PathBuf::from("."));
        assert!((args.percent(&config) - 1.0).abs() < f64::EPSILON);
        assert!(!args.json());
        assert!(!args.verbose(&config));
        assert!(args.progress_enabled(&config));
    }

    #[test]
    fn test_custom_directory() {
        let args = Cli::parse_from(["dirsum", "/custom/path"]);
        let config = FileConfig::default();

        assert_eq!(args.directory(&config), PathBuf::from("/custom/path"));
    }

    #[test]
    fn test_percent_long_and_short_flags() {
        let config = FileConfig::default();

        let long = Cli::parse_from(["dirsum", "--percent", "5"]);
        assert!((long.percent(&config) - 5.0).abs() < f64::EPSILON);

        let short = Cli::parse_from(["dirsum", "-p", "2.5"]);
        assert!((short.percent(&config) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_and_negative_percent_accepted() {
        let config = FileConfig::default();

        let zero = Cli::parse_from(["dirsum", "--percent", "0"]);
        assert!(zero.percent(&config).abs() < f64::EPSILON);

        let negative = Cli::parse_from(["dirsum", "--percent", "-3"]);
        assert!((negative.percent(&config) + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_flag() {
        let args = Cli::parse_from(["dirsum", "--json"]);
        assert!(args.json());
    }

    #[test]
    fn test_verbose_flags() {
        let config = FileConfig::default();

        let long = Cli::parse_from(["dirsum", "--verbose"]);
        assert!(long.verbose(&config));

        let short = Cli::parse_from(["dirsum", "-v"]);
        assert!(short.verbose(&config));
    }

    #[test]
    fn test_no_progress_flag() {
        let args = Cli::parse_from(["dirsum", "--no-progress"]);
        let config = FileConfig::default();

        assert!(!args.progress_enabled(&config));
    }

    // ── Config merging tests ───────────────────────────────────────────

    #[test]
    fn test_config_values_used_when_cli_absent() {
        let args = Cli::parse_from(["dirsum"]);
        let config = FileConfig {
            dir: Some(PathBuf::from("/config/dir")),
            percent: Some(7.5),
            verbose: Some(true),
            progress: Some(false),
        };

        assert_eq!(args.directory(&config), PathBuf::from("/config/dir"));
        assert!((args.percent(&config) - 7.5).abs() < f64::EPSILON);
        assert!(args.verbose(&config));
        assert!(!args.progress_enabled(&config));
    }

    #[test]
    fn test_cli_overrides_config_values() {
        let args = Cli::parse_from(["dirsum", "/cli/dir", "--percent", "10"]);
        let config = FileConfig {
            dir: Some(PathBuf::from("/config/dir")),
            percent: Some(7.5),
            ..FileConfig::default()
        };

        assert_eq!(args.directory(&config), PathBuf::from("/cli/dir"));
        assert!((args.percent(&config) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_progress_overrides_config_true() {
        let args = Cli::parse_from(["dirsum", "--no-progress"]);
        let config = FileConfig {
            progress: Some(true),
            ..FileConfig::default()
        };

        assert!(!args.progress_enabled(&config));
    }

    #[test]
    fn test_config_dir_with_tilde_expansion() {
        let args = Cli::parse_from(["dirsum"]);
        let config = FileConfig {
            dir: Some(PathBuf::from("~/Projects")),
            ..FileConfig::default()
        };

        if let Some(home) = dirs::home_dir() {
            assert_eq!(args.directory(&config), home.join("Projects"));
        }
    }

    #[test]
    fn test_cli_dir_not_tilde_expanded() {
        // Shell expansion handles ~ on the command line; a literal ~ from
        // the CLI is passed through as-is.
        let args = Cli::parse_from(["dirsum", "~/Projects"]);
        let config = FileConfig::default();

        assert_eq!(args.directory(&config), PathBuf::from("~/Projects"));
    }
}
