//! Directory entries and the reader that lists them

use std::ffi::OsString;
use std::io;
use std::path::Path;

/// One child of a directory, as seen when the directory was read.
///
/// The name is kept exactly as the filesystem returned it so that joining it
/// onto the parent always yields a path that exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: OsString,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl DirectoryEntry {
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            is_symlink: false,
        }
    }

    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            is_symlink: false,
        }
    }

    pub fn symlink(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            is_symlink: true,
        }
    }

    /// Whether the walker should descend into this entry.
    pub fn is_traversable(&self) -> bool {
        self.is_dir && !self.is_symlink
    }
}

/// Lists the immediate entries of a directory.
///
/// Called concurrently from every worker thread, so implementations must not
/// keep mutable state between calls.
pub trait EntryReader: Send + Sync {
    fn read_entries(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>>;
}

/// Reads entries from the local filesystem.
///
/// Entries are sorted by name. File types come from the directory entry
/// itself, so a symlink to a directory is reported as a symlink, not a directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsEntryReader;

impl EntryReader for FsEntryReader {
    fn read_entries(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            entries.push(DirectoryEntry {
                name: entry.file_name(),
                is_dir: file_type.is_dir(),
                is_symlink: file_type.is_symlink(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTree;

    #[test]
    fn test_fs_reader_sorts_and_types_entries() {
        let tree = TestTree::new();
        tree.add_file("b.txt", "b");
        tree.add_dir("a");
        tree.add_file("c/inner.txt", "c");

        let entries = FsEntryReader.read_entries(tree.path()).unwrap();
        assert_eq!(
            entries,
            vec![
                DirectoryEntry::dir("a"),
                DirectoryEntry::file("b.txt"),
                DirectoryEntry::dir("c"),
            ]
        );
    }

    #[test]
    fn test_fs_reader_missing_directory() {
        let tree = TestTree::new();
        let err = FsEntryReader
            .read_entries(&tree.path().join("missing"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    #[cfg(unix)]
    fn test_fs_reader_marks_symlinks() {
        let tree = TestTree::new();
        tree.add_dir("real");
        tree.add_symlink("real", "link");

        let entries = FsEntryReader.read_entries(tree.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_symlink);
        assert!(!link.is_dir);
        assert!(!link.is_traversable());
    }

    #[test]
    #[cfg(unix)]
    fn test_fs_reader_keeps_raw_names() {
        use std::os::unix::ffi::OsStrExt;

        let tree = TestTree::new();
        let raw = std::ffi::OsStr::from_bytes(b"bad\xff");
        std::fs::create_dir(tree.path().join(raw)).unwrap();

        let entries = FsEntryReader.read_entries(tree.path()).unwrap();
        assert_eq!(entries, vec![DirectoryEntry::dir(raw)]);
        assert!(tree.path().join(&entries[0].name).is_dir());
    }
}
