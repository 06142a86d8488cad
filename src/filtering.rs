//! Threshold selection over a scanned usage tree.
//!
//! This module turns a [`DirUsage`] tree into the flat, ordered list of
//! records the report shows: derive the byte threshold from the requested
//! percentage, flatten the tree pre-order while pruning subtrees below the
//! threshold, keep the root unconditionally, and sort by inclusive size,
//! largest first.

use crate::usage::DirUsage;

/// Derive the minimum inclusive size from a percentage of the total.
///
/// `percent <= 0` means "show everything" and maps to a threshold of zero.
/// Otherwise the threshold is `floor(total_size * percent / 100)`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn min_size_from_percent(total_size: u64, percent: f64) -> u64 {
    if percent <= 0.0 {
        return 0;
    }
    ((total_size as f64) * (percent / 100.0)).floor() as u64
}

/// Flatten the tree pre-order, keeping nodes with `inclusive_size >= min_size`.
///
/// When a node fails the threshold its entire subtree is skipped. This
/// short-circuit is safe because a child's inclusive size can never exceed
/// its parent's: once a parent is below the threshold, every descendant is
/// too. The returned order is pre-order: parent before children, children in
/// the scanner's file-name order.
#[must_use]
pub fn flatten_by_min_size(root: &DirUsage, min_size: u64) -> Vec<&DirUsage> {
    let mut records = Vec::new();
    collect_above_threshold(root, min_size, &mut records);
    records
}

/// Pre-order walk with subtree pruning.
fn collect_above_threshold<'a>(node: &'a DirUsage, min_size: u64, out: &mut Vec<&'a DirUsage>) {
    if node.inclusive_size < min_size {
        return;
    }
    out.push(node);
    for child in &node.children {
        collect_above_threshold(child, min_size, out);
    }
}

/// Build the final, ordered report for a scanned tree.
///
/// Applies the percentage threshold, guarantees the root record is present
/// (by path equality, so the rule holds even in degenerate threshold cases),
/// and sorts by inclusive size descending. The sort is stable, so records of
/// equal size keep their relative pre-order position.
#[must_use]
pub fn build_report(root: &DirUsage, percent: f64) -> Vec<&DirUsage> {
    let min_size = min_size_from_percent(root.inclusive_size, percent);
    let mut records = flatten_by_min_size(root, min_size);

    // The root is always reported, whatever the threshold worked out to.
    if records.first().is_none_or(|record| record.path != root.path) {
        records.insert(0, root);
    }

    records.sort_by(|a, b| b.inclusive_size.cmp(&a.inclusive_size));
    records
}
