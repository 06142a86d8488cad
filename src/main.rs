//! # dirsum
//!
//! A CLI tool that summarizes the disk usage of a directory tree.
//!
//! For every subdirectory it computes the bytes owned directly by files in
//! that directory (exclusive size) and the bytes owned by the directory plus
//! all descendants (inclusive size), then prints the directories whose
//! inclusive size reaches a percentage threshold of the root's total,
//! sorted largest first.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize the current directory (1% threshold)
//! dirsum
//!
//! # Summarize a folder, showing directories >= 5% of the total
//! dirsum ~/Projects --percent 5
//!
//! # Machine-readable output
//! dirsum /var/log --json
//! ```

mod cli;

use std::path::Path;
use std::process::exit;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dirsum::{
    config::FileConfig,
    filtering::{build_report, min_size_from_percent},
    output::{JsonReport, format_elapsed, render_table},
    scanner::{Progress, Scanner},
    usage::DirUsage,
};
use indicatif::{ProgressBar, ProgressStyle};

/// Update the spinner message once per this many files.
const PROGRESS_EVERY_FILES: u64 = 100;

/// Entry point for the dirsum application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and
/// printing any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Orchestrates the full pipeline: parse arguments, scan the tree, select
/// the directories above the threshold, and render the report.
///
/// # Errors
///
/// Returns errors when the target directory cannot be resolved, does not
/// exist, is not a directory, or cannot be listed, and when JSON
/// serialization fails.
fn inner_main() -> Result<()> {
    let args = cli::Cli::parse();

    let json_mode = args.json();
    let file_config = load_config(json_mode);

    let dir = args.directory(&file_config);
    let percent = args.percent(&file_config);
    let verbose = args.verbose(&file_config);
    let show_progress = args.progress_enabled(&file_config) && !json_mode;

    let root_path = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", dir.display()))?;

    if !json_mode {
        println!(
            "{} {}",
            "Getting disk usage for:".bold(),
            root_path.display()
        );
    }

    let mut spinner = SpinnerProgress::new(show_progress);
    let start = Instant::now();

    let (root, files_seen, errors) = {
        let mut scanner = Scanner::new().with_progress(&mut spinner);
        let root = scanner.scan(&root_path)?;
        (root, scanner.files_seen(), scanner.errors().to_vec())
    };

    spinner.finish();
    let elapsed = start.elapsed();

    if !json_mode {
        println!("Scanned {files_seen} files in {}", format_elapsed(elapsed));
    }

    print_report(&root, &root_path, percent, files_seen, json_mode)?;

    if verbose {
        for error in &errors {
            eprintln!("{}", error.red());
        }
    } else if !json_mode && !errors.is_empty() {
        eprintln!(
            "{}",
            format!(
                "Skipped {} unreadable entries (run with --verbose for details)",
                errors.len()
            )
            .yellow()
        );
    }

    Ok(())
}

/// Select the directories above the threshold and print the report.
fn print_report(
    root: &DirUsage,
    root_path: &Path,
    percent: f64,
    files_seen: u64,
    json_mode: bool,
) -> Result<()> {
    let min_size = min_size_from_percent(root.inclusive_size, percent);
    let records = build_report(root, percent);

    if json_mode {
        let report = JsonReport::from_records(
            &records,
            root_path,
            percent,
            min_size,
            root.inclusive_size,
            files_seen,
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        print!("{}", render_table(&records, root_path));
    }

    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

/// Progress observer that drives an indicatif spinner.
///
/// The scanner reports every file; the spinner message is only refreshed
/// once per [`PROGRESS_EVERY_FILES`] files to keep terminal writes cheap.
struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    /// Create the spinner, hidden when `visible` is false.
    ///
    /// # Panics
    ///
    /// May panic if the progress bar template string is invalid, though this
    /// should not occur as the template is hardcoded and valid.
    fn new(visible: bool) -> Self {
        let bar = if visible {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            pb.set_message("Scanning...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    /// Stop the spinner and clear its line.
    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Progress for SpinnerProgress {
    fn file_visited(&mut self, files_seen: u64) {
        if files_seen % PROGRESS_EVERY_FILES == 0 {
            self.bar
                .set_message(format!("Scanning... {files_seen} files"));
        }
    }
}
