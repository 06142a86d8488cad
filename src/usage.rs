//! Per-directory usage records.
//!
//! This module defines [`DirUsage`], the result tree produced by a scan. Each
//! node owns its children by value; the structure is acyclic by construction
//! because every node corresponds to exactly one directory entry visited once.

use std::path::{Path, PathBuf};

/// Disk usage for a single directory.
///
/// The scanner guarantees the size invariant
/// `inclusive_size == exclusive_size + Σ children.inclusive_size`
/// for every node it produces, even when some descendants were unreadable
/// (those are simply absent from `children` and counted nowhere).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirUsage {
    /// Path of the directory this record describes.
    pub path: PathBuf,

    /// Total size of the regular files directly inside this directory, in bytes.
    pub exclusive_size: u64,

    /// `exclusive_size` plus the inclusive sizes of all child directories.
    pub inclusive_size: u64,

    /// Child directory records, in file-name order.
    pub children: Vec<DirUsage>,
}

impl DirUsage {
    /// Create an empty record for the given directory path.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            exclusive_size: 0,
            inclusive_size: 0,
            children: Vec::new(),
        }
    }

    /// Number of records in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::node_count)
            .sum::<usize>()
    }

    /// Check the size invariant for this node and every descendant.
    ///
    /// Returns `true` when each record satisfies
    /// `inclusive_size == exclusive_size + Σ children.inclusive_size`.
    /// Scanner output always passes; hand-built trees used in tests can
    /// assert this before relying on pruning behaviour.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let child_sum: u64 = self.children.iter().map(|c| c.inclusive_size).sum();
        self.inclusive_size == self.exclusive_size + child_sum
            && self.children.iter().all(Self::is_consistent)
    }
}
