//! Test utilities for building directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::tree::{DirectoryEntry, EntryReader};

/// A temporary directory tree for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory (and any missing parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `link` pointing to `target` (taken as written).
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let link_path = self.dir.path().join(link);
        std::os::unix::fs::symlink(target, &link_path).expect("Failed to create symlink");
        link_path
    }

    /// Build `width` directories per level, `depth` levels deep, each holding `files` files.
    pub fn add_grid(&self, width: usize, depth: usize, files: usize) {
        fn fill(dir: &Path, width: usize, depth: usize, files: usize) {
            for f in 0..files {
                fs::write(dir.join(format!("file{}.txt", f)), "").expect("Failed to write file");
            }
            if depth == 0 {
                return;
            }
            for w in 0..width {
                let child = dir.join(format!("dir{}", w));
                fs::create_dir(&child).expect("Failed to create dir");
                fill(&child, width, depth - 1, files);
            }
        }
        fill(self.dir.path(), width, depth, files);
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory entry reader with scripted results.
///
/// Paths without a scripted result fail with `NotFound`.
#[derive(Debug, Default)]
pub struct FakeReader {
    dirs: HashMap<PathBuf, Result<Vec<DirectoryEntry>, io::ErrorKind>>,
}

impl FakeReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the entries returned for `path`.
    pub fn dir(mut self, path: impl Into<PathBuf>, entries: Vec<DirectoryEntry>) -> Self {
        self.dirs.insert(path.into(), Ok(entries));
        self
    }

    /// Script a failure for `path`.
    pub fn fail(mut self, path: impl Into<PathBuf>, kind: io::ErrorKind) -> Self {
        self.dirs.insert(path.into(), Err(kind));
        self
    }
}

impl EntryReader for FakeReader {
    fn read_entries(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        match self.dirs.get(path) {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(kind)) => Err(io::Error::from(*kind)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}
