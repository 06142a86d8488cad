//! # dirsum
//!
//! A CLI tool that summarizes the disk usage of a directory tree.
//!
//! For every subdirectory under a root, `dirsum` computes the bytes owned
//! directly by files in that directory (the *exclusive* size) and the bytes
//! owned by the directory plus all of its descendants (the *inclusive* size).
//! It then reports the directories whose inclusive size reaches a percentage
//! threshold of the root's total, sorted largest first.
//!
//! ## Pipeline
//!
//! The crate is composed of two sequential stages:
//!
//! 1. [`scanner`] walks the tree once, depth-first and single-threaded,
//!    building a [`usage::DirUsage`] record tree. Inaccessible entries are
//!    skipped without aborting the scan.
//! 2. [`filtering`] flattens that tree, pruning every subtree whose inclusive
//!    size falls below the threshold, and orders the surviving records by
//!    inclusive size, largest first.
//!
//! Rendering ([`output`]) and configuration ([`config`]) are thin layers
//! around that core.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize the current directory, showing directories >= 1% of the total
//! dirsum
//!
//! # Summarize a specific directory with a 5% threshold
//! dirsum ~/Projects --percent 5
//!
//! # Machine-readable output
//! dirsum /var/log --json
//! ```

pub mod config;
pub mod filtering;
pub mod output;
pub mod scanner;
pub mod usage;
