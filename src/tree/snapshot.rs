//! In-memory snapshot of a traversed directory subtree

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use super::entry::DirectoryEntry;

/// Map from absolute directory path to the entries read for it.
///
/// Each directory is recorded at most once and never modified afterwards.
#[derive(Debug, Default, Clone)]
pub struct DirectoryTree {
    dirs: HashMap<PathBuf, Vec<DirectoryEntry>>,
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entries of `path`.
    ///
    /// Returns `false` without touching the tree if `path` was already recorded.
    pub fn insert(&mut self, path: PathBuf, entries: Vec<DirectoryEntry>) -> bool {
        match self.dirs.entry(path) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entries);
                true
            }
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.dirs.contains_key(path)
    }

    /// Entries recorded for `path`, in the order they were read.
    pub fn entries(&self, path: &Path) -> Option<&[DirectoryEntry]> {
        self.dirs.get(path).map(Vec::as_slice)
    }

    /// All recorded directory paths, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.dirs.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Whether every directory could be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalStatus {
    Ok,
    /// At least one directory failed with a recoverable error and was recorded empty
    Partial,
}

/// Counts of recoverable anomalies seen during a traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureCounts {
    pub permission_denied: usize,
    pub not_found: usize,
    /// Results discarded because their directory was already recorded
    pub duplicates: usize,
}

impl FailureCounts {
    /// Directories that could not be read.
    pub fn unreadable(&self) -> usize {
        self.permission_denied + self.not_found
    }
}

/// A completed traversal: the tree plus how it went.
#[derive(Debug, Clone)]
pub struct TraversalOutcome {
    pub root: PathBuf,
    pub tree: DirectoryTree,
    pub failures: FailureCounts,
}

impl TraversalOutcome {
    pub fn status(&self) -> TraversalStatus {
        if self.failures.unreadable() == 0 {
            TraversalStatus::Ok
        } else {
            TraversalStatus::Partial
        }
    }

    pub fn is_partial(&self) -> bool {
        self.status() == TraversalStatus::Partial
    }
}
