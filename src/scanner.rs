//! Recursive directory size aggregation.
//!
//! This module provides the core scanning logic that walks a directory tree
//! and builds the [`DirUsage`] record tree. The walk is a single-threaded,
//! synchronous, depth-first recursion: each call fully completes (including
//! all of its children) before control returns to the caller.
//!
//! Errors accessing a single entry are handled where they occur: the entry is
//! skipped, a diagnostic is recorded, and the traversal continues. Only the
//! root itself failing is fatal.

use std::fmt;
use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::usage::DirUsage;

/// Observer notified once per regular file processed during a scan.
///
/// The observer is purely observational: it cannot affect sizes, ordering,
/// or error handling. Separating the "one file was processed" event from any
/// particular rendering policy keeps the size computation testable without a
/// terminal attached.
pub trait Progress {
    /// Called after each regular file is counted, with the running total of
    /// files seen in the current scan.
    fn file_visited(&mut self, files_seen: u64);
}

/// A [`Progress`] implementation that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn file_visited(&mut self, _files_seen: u64) {}
}

/// Outcome of processing one directory entry.
///
/// Making the per-entry policy a value rather than silent suppression keeps
/// it visible: an entry either contributes file bytes, contributes a whole
/// subtree, or is skipped and counted nowhere.
enum EntryOutcome {
    /// A regular file of the given size.
    File(u64),

    /// A successfully scanned child directory.
    Subtree(DirUsage),

    /// An ignored entry kind (symlink, socket, device, ...) or one that
    /// could not be accessed.
    Skipped,
}

/// Directory scanner that aggregates per-directory sizes.
///
/// A `Scanner` owns the mutable state threaded through the recursion: the
/// running file counter for progress reporting and the diagnostics collected
/// for entries that could not be read. Both reset at the start of each
/// [`scan`](Self::scan) call.
pub struct Scanner<'obs> {
    /// Optional observer notified once per file processed.
    progress: Option<&'obs mut dyn Progress>,

    /// Regular files counted so far in the current scan.
    files_seen: u64,

    /// Diagnostics for entries that were skipped due to access errors.
    errors: Vec<String>,
}

impl fmt::Debug for Scanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("has_progress", &self.progress.is_some())
            .field("files_seen", &self.files_seen)
            .field("errors", &self.errors)
            .finish()
    }
}

impl Default for Scanner<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'obs> Scanner<'obs> {
    /// Create a scanner with no progress observer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            progress: None,
            files_seen: 0,
            errors: Vec::new(),
        }
    }

    /// Attach a progress observer that is notified once per file processed.
    #[must_use]
    pub fn with_progress(mut self, progress: &'obs mut dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Scan the directory tree rooted at `root`.
    ///
    /// The root is stat'ed following symlinks, so a symlink to a directory is
    /// a valid root. Entries below the root are stat'ed without following
    /// symlinks; symlinked subdirectories are not descended into.
    ///
    /// Within each directory, entries are processed in file-name order
    /// (byte order), independent of the order the OS lists them in, so
    /// repeated scans of an unchanged tree produce identical trees.
    ///
    /// # Errors
    ///
    /// Fails when `root` does not exist, cannot be stat'ed, is not a
    /// directory, or its entries cannot be listed. Errors on anything below
    /// the root are not fatal: the affected entry or subtree is skipped, its
    /// bytes are not counted anywhere, and a diagnostic is recorded
    /// (see [`errors`](Self::errors)).
    pub fn scan(&mut self, root: &Path) -> Result<DirUsage> {
        self.files_seen = 0;
        self.errors.clear();

        let metadata =
            fs::metadata(root).with_context(|| format!("Failed to access {}", root.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", root.display());
        }

        self.scan_dir(root)
            .with_context(|| format!("Failed to list {}", root.display()))
    }

    /// Number of regular files counted during the last scan.
    #[must_use]
    pub const fn files_seen(&self) -> u64 {
        self.files_seen
    }

    /// Diagnostics for entries skipped during the last scan.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Recursively aggregate one directory.
    ///
    /// Returns `Err` only when the directory itself cannot be listed; the
    /// caller decides whether that is fatal (root) or a skipped subtree
    /// (everywhere else).
    fn scan_dir(&mut self, path: &Path) -> io::Result<DirUsage> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => self.record_error(path, &e),
            }
        }
        entries.sort_by_key(DirEntry::file_name);

        let mut usage = DirUsage::new(path);
        for entry in &entries {
            match self.process_entry(entry) {
                EntryOutcome::File(size) => {
                    usage.exclusive_size += size;
                    usage.inclusive_size += size;
                    self.files_seen += 1;
                    let files_seen = self.files_seen;
                    if let Some(progress) = self.progress.as_deref_mut() {
                        progress.file_visited(files_seen);
                    }
                }
                EntryOutcome::Subtree(child) => {
                    usage.inclusive_size += child.inclusive_size;
                    usage.children.push(child);
                }
                EntryOutcome::Skipped => {}
            }
        }

        Ok(usage)
    }

    /// Classify a single directory entry and compute its contribution.
    ///
    /// Entry metadata is read without following symlinks, so a symlink to a
    /// directory is ignored rather than descended into. Stat errors skip the
    /// entry; a failed recursive scan skips the whole subtree.
    fn process_entry(&mut self, entry: &DirEntry) -> EntryOutcome {
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                self.record_error(&entry.path(), &e);
                return EntryOutcome::Skipped;
            }
        };

        if file_type.is_file() {
            match entry.metadata() {
                Ok(metadata) => EntryOutcome::File(metadata.len()),
                Err(e) => {
                    self.record_error(&entry.path(), &e);
                    EntryOutcome::Skipped
                }
            }
        } else if file_type.is_dir() {
            let child_path = entry.path();
            match self.scan_dir(&child_path) {
                Ok(child) => EntryOutcome::Subtree(child),
                Err(e) => {
                    self.record_error(&child_path, &e);
                    EntryOutcome::Skipped
                }
            }
        } else {
            EntryOutcome::Skipped
        }
    }

    /// Record a diagnostic for a skipped entry.
    fn record_error(&mut self, path: &Path, error: &io::Error) {
        self.errors.push(format!("{}: {error}", path.display()));
    }
}
