//! Concurrent directory traversal
//!
//! `TreeWalker` reads a whole subtree into a `DirectoryTree` using a bounded
//! pool of worker threads. The finished tree is handed to the output module
//! for rendering; nothing here formats or prints.

mod config;
mod entry;
mod queue;
mod snapshot;
mod walker;

// Re-export public types
pub use config::{DEFAULT_QUEUE_CAPACITY, WalkerConfig};
pub use entry::{DirectoryEntry, EntryReader, FsEntryReader};
pub use queue::{PendingWork, QueueStats};
pub use snapshot::{DirectoryTree, FailureCounts, TraversalOutcome, TraversalStatus};
pub use walker::{TreeWalker, resolve_root};
