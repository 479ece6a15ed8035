//! Canopy - a concurrent directory tree listing
//!
//! The subtree is first read into memory by a pool of worker threads
//! (`tree`), then rendered single-threaded as an indented or full-path
//! listing (`output`).

pub mod app;
pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use app::{ExitStatus, Report, Request, RunError, run};
pub use error::{ErrorClass, WalkError, classify};
pub use output::{OutputConfig, Painter, Rendering, Role, TreeFormatter, write_json};
pub use tree::{
    DirectoryEntry, DirectoryTree, EntryReader, FsEntryReader, TraversalOutcome, TraversalStatus,
    TreeWalker, WalkerConfig, resolve_root,
};
