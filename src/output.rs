//! Report rendering: text table and structured JSON output.
//!
//! The selection pipeline produces an ordered list of [`DirUsage`] records;
//! this module turns that list into something printable. Two renderings are
//! supported: a human-readable table with right-aligned size columns, and a
//! single JSON document for scripting (`--json`), which replaces all
//! human-readable output.

use std::fmt::Write as _;
use std::path::{MAIN_SEPARATOR, Path};
use std::time::Duration;

use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::usage::DirUsage;

/// Render a directory path relative to the scanned root.
///
/// The root itself renders as `.`, descendants as `./sub/dir` with native
/// separators. Paths outside the root (which should not occur in practice)
/// fall back to their full display form.
#[must_use]
pub fn display_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => format!(".{MAIN_SEPARATOR}{}", rel.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Format an elapsed duration as `HH:MM:SS.ss`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = elapsed.as_secs_f64() - (hours * 3600 + minutes * 60) as f64;
    format!("{hours:02}:{minutes:02}:{seconds:05.2}")
}

/// Render the report as a text table.
///
/// Two right-aligned size columns (inclusive, then exclusive) followed by the
/// directory path displayed relative to `base`. Sizes use decimal units
/// (`kB`, `MB`, ...).
#[must_use]
pub fn render_table(records: &[&DirUsage], base: &Path) -> String {
    let mut table = String::new();
    let _ = writeln!(table, "{:>12}  {:>12}  Directory", "Inclusive", "Exclusive");
    table.push_str(&"-".repeat(60));
    table.push('\n');

    for record in records {
        let _ = writeln!(
            table,
            "{:>12}  {:>12}  {}",
            format_size(record.inclusive_size, DECIMAL),
            format_size(record.exclusive_size, DECIMAL),
            display_path(&record.path, base),
        );
    }

    table
}

/// Top-level JSON document emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonReport {
    /// Resolved path of the scanned root directory.
    pub root: String,

    /// The percentage threshold the report was built with.
    pub percent: f64,

    /// Derived byte threshold: directories below this inclusive size were pruned.
    pub min_size: u64,

    /// Aggregated totals for the scan.
    pub summary: JsonSummary,

    /// Reported directories, largest inclusive size first.
    pub directories: Vec<JsonDirEntry>,
}

/// Scan-wide totals in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonSummary {
    /// Number of directories in the report.
    pub directories: usize,

    /// Inclusive size of the root, in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size (e.g. `"1.23 GB"`).
    pub total_size_formatted: String,

    /// Number of regular files counted during the scan.
    pub files_seen: u64,
}

/// A single directory entry in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonDirEntry {
    /// Path relative to the scanned root (`.`, `./sub`, ...).
    pub path: String,

    /// Bytes of regular files directly inside this directory.
    pub exclusive_size: u64,

    /// Human-readable formatted exclusive size.
    pub exclusive_size_formatted: String,

    /// Bytes of this directory plus all descendants.
    pub inclusive_size: u64,

    /// Human-readable formatted inclusive size.
    pub inclusive_size_formatted: String,
}

impl JsonReport {
    /// Build the JSON document from an ordered report.
    #[must_use]
    pub fn from_records(
        records: &[&DirUsage],
        base: &Path,
        percent: f64,
        min_size: u64,
        total_size: u64,
        files_seen: u64,
    ) -> Self {
        Self {
            root: base.display().to_string(),
            percent,
            min_size,
            summary: JsonSummary {
                directories: records.len(),
                total_size,
                total_size_formatted: format_size(total_size, DECIMAL),
                files_seen,
            },
            directories: records
                .iter()
                .map(|record| JsonDirEntry::from_record(record, base))
                .collect(),
        }
    }
}

impl JsonDirEntry {
    /// Convert a [`DirUsage`] record into a JSON entry.
    #[must_use]
    pub fn from_record(record: &DirUsage, base: &Path) -> Self {
        Self {
            path: display_path(&record.path, base),
            exclusive_size: record.exclusive_size,
            exclusive_size_formatted: format_size(record.exclusive_size, DECIMAL),
            inclusive_size: record.inclusive_size,
            inclusive_size_formatted: format_size(record.inclusive_size, DECIMAL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: &str, exclusive: u64, inclusive: u64) -> DirUsage {
        DirUsage {
            path: PathBuf::from(path),
            exclusive_size: exclusive,
            inclusive_size: inclusive,
            children: vec![],
        }
    }

    #[test]
    fn test_display_path_root() {
        assert_eq!(display_path(Path::new("/data"), Path::new("/data")), ".");
    }

    #[test]
    fn test_display_path_descendant() {
        let rendered = display_path(Path::new("/data/sub/inner"), Path::new("/data"));
        assert_eq!(
            rendered,
            format!(".{MAIN_SEPARATOR}sub{MAIN_SEPARATOR}inner")
        );
    }

    #[test]
    fn test_display_path_outside_base_falls_back() {
        assert_eq!(
            display_path(Path::new("/elsewhere"), Path::new("/data")),
            "/elsewhere"
        );
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00:00.00");
        assert_eq!(format_elapsed(Duration::from_millis(1230)), "00:00:01.23");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "00:01:01.00");
        assert_eq!(format_elapsed(Duration::from_secs(3600 + 120 + 3)), "01:02:03.00");
    }

    #[test]
    fn test_render_table_rows() {
        let root = record("/data", 400, 1000);
        let sub = record("/data/sub", 600, 600);
        let records = vec![&root, &sub];

        let table = render_table(&records, Path::new("/data"));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4); // header, separator, two rows
        assert!(lines[0].contains("Inclusive"));
        assert!(lines[0].contains("Exclusive"));
        assert!(lines[2].ends_with("  ."));
        assert!(lines[3].ends_with(&format!("  .{MAIN_SEPARATOR}sub")));
        assert!(lines[2].contains("1 kB"));
        assert!(lines[3].contains("600 B"));
    }

    #[test]
    fn test_render_table_empty() {
        let table = render_table(&[], Path::new("/data"));
        assert_eq!(table.lines().count(), 2); // header and separator only
    }

    #[test]
    fn test_json_report_shape() {
        let root = record("/data", 400, 1000);
        let sub = record("/data/sub", 600, 600);
        let records = vec![&root, &sub];

        let report = JsonReport::from_records(&records, Path::new("/data"), 50.0, 500, 1000, 3);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["root"], "/data");
        assert_eq!(value["percent"], 50.0);
        assert_eq!(value["min_size"], 500);
        assert_eq!(value["summary"]["directories"], 2);
        assert_eq!(value["summary"]["total_size"], 1000);
        assert_eq!(value["summary"]["files_seen"], 3);
        assert_eq!(value["directories"][0]["path"], ".");
        assert_eq!(value["directories"][0]["inclusive_size"], 1000);
        assert_eq!(value["directories"][0]["exclusive_size"], 400);
        assert_eq!(
            value["directories"][1]["path"],
            format!(".{MAIN_SEPARATOR}sub")
        );
    }

    #[test]
    fn test_json_entry_formats_sizes() {
        let entry = JsonDirEntry::from_record(&record("/data/sub", 600, 1500), Path::new("/data"));

        assert_eq!(entry.exclusive_size_formatted, "600 B");
        assert_eq!(entry.inclusive_size_formatted, "1.50 kB");
    }
}
