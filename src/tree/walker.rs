//! TreeWalker - reads a directory subtree concurrently into a `DirectoryTree`
//!
//! A fixed pool of worker threads reads directories taken from a bounded
//! queue. The calling thread acts as the single aggregator: it records every
//! result in the tree, classifies failures and schedules newly discovered
//! subdirectories. All workers are joined before `walk` returns.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use tracing::{debug, error, trace, warn};

use crate::error::{ErrorClass, WalkError, classify};

use super::config::WalkerConfig;
use super::entry::{DirectoryEntry, EntryReader, FsEntryReader};
use super::queue::PendingWork;
use super::snapshot::{DirectoryTree, FailureCounts, TraversalOutcome};

/// Result of reading one directory, sent from a worker to the aggregator.
struct DirResult {
    path: PathBuf,
    entries: io::Result<Vec<DirectoryEntry>>,
}

/// Concurrent directory walker.
pub struct TreeWalker<R = FsEntryReader> {
    config: WalkerConfig,
    reader: R,
}

impl TreeWalker<FsEntryReader> {
    pub fn new(config: WalkerConfig) -> Self {
        Self {
            config,
            reader: FsEntryReader,
        }
    }
}

impl<R: EntryReader> TreeWalker<R> {
    /// Replace the entry reader (used to read from something other than the local disk).
    pub fn with_reader<R2: EntryReader>(self, reader: R2) -> TreeWalker<R2> {
        TreeWalker {
            config: self.config,
            reader,
        }
    }

    /// Read every directory reachable from `root` through non-symlink
    /// directory entries.
    ///
    /// `root` should be absolute and normalized (see [`resolve_root`]); tree
    /// keys are built by joining entry names onto it.
    pub fn walk(&self, root: &Path) -> Result<TraversalOutcome, WalkError> {
        let workers = self.config.worker_count();
        let cancelled = AtomicBool::new(false);
        debug!(root = %root.display(), workers, "starting traversal");

        let (tree, failures) = thread::scope(|scope| {
            let (work_tx, work_rx) = bounded::<PathBuf>(self.config.queue_capacity.max(1));
            let (result_tx, result_rx) = unbounded::<DirResult>();

            for id in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let reader = &self.reader;
                let cancelled = &cancelled;
                thread::Builder::new()
                    .name(format!("canopy-walker-{}", id))
                    .spawn_scoped(scope, move || {
                        worker_loop(id, reader, work_rx, result_tx, cancelled)
                    })
                    .map_err(|source| WalkError::WorkerSpawn { id, source })?;
            }
            // Only workers hold these now, so disconnection means they are all gone
            drop(work_rx);
            drop(result_tx);

            let mut pending = PendingWork::new(work_tx);
            let result = self.aggregate(root, &mut pending, &result_rx);
            if result.is_err() {
                cancelled.store(true, Ordering::SeqCst);
            }
            pending.close();

            let stats = pending.stats();
            debug!(
                enqueued = stats.enqueued,
                backpressure = stats.backpressure_events,
                peak_backlog = stats.peak_backlog,
                "work queue drained"
            );
            result
        })?;

        debug!(
            dirs = tree.len(),
            unreadable = failures.unreadable(),
            duplicates = failures.duplicates,
            "traversal finished"
        );

        Ok(TraversalOutcome {
            root: root.to_path_buf(),
            tree,
            failures,
        })
    }

    /// Record results until the outstanding-work counter reaches zero.
    fn aggregate(
        &self,
        root: &Path,
        pending: &mut PendingWork,
        results: &Receiver<DirResult>,
    ) -> Result<(DirectoryTree, FailureCounts), WalkError> {
        let mut tree = DirectoryTree::new();
        let mut failures = FailureCounts::default();

        pending.schedule(root.to_path_buf());

        while !pending.is_done() {
            let Ok(DirResult { path, entries }) = pending.recv_result(results) else {
                return Err(WalkError::WorkersExited {
                    outstanding: pending.outstanding(),
                });
            };

            if tree.contains(&path) {
                failures.duplicates += 1;
                warn!(path = %path.display(), "duplicated directory, discarding second read");
                pending.complete();
                continue;
            }

            match entries {
                Ok(entries) => {
                    let children: Vec<PathBuf> = entries
                        .iter()
                        .filter(|entry| entry.is_traversable())
                        .map(|entry| path.join(&entry.name))
                        .collect();
                    trace!(path = %path.display(), entries = entries.len(), "directory recorded");
                    tree.insert(path, entries);
                    for child in children {
                        pending.schedule(child);
                    }
                }
                Err(err) => {
                    self.handle_failure(root, &path, err, &mut failures)?;
                    tree.insert(path, Vec::new());
                }
            }

            pending.complete();
        }

        Ok((tree, failures))
    }

    /// Decide what a failed read means for the traversal.
    ///
    /// Returns an error when the traversal must stop.
    fn handle_failure(
        &self,
        root: &Path,
        path: &Path,
        err: io::Error,
        failures: &mut FailureCounts,
    ) -> Result<(), WalkError> {
        if path == root {
            error!(path = %path.display(), error = %err, "cannot read root directory");
            return Err(WalkError::RootUnreadable {
                path: path.to_path_buf(),
                source: err,
            });
        }

        if classify(&err) == ErrorClass::Fatal {
            error!(path = %path.display(), error = %err, "unrecoverable read failure");
            return Err(WalkError::Io {
                path: path.to_path_buf(),
                source: err,
            });
        }

        if self.config.abort_on_error {
            error!(path = %path.display(), error = %err, "aborting at first failure");
            return Err(WalkError::Aborted {
                path: path.to_path_buf(),
                source: err,
            });
        }

        match err.kind() {
            io::ErrorKind::PermissionDenied => failures.permission_denied += 1,
            _ => failures.not_found += 1,
        }
        warn!(path = %path.display(), error = %err, "skipping unreadable directory");
        Ok(())
    }
}

/// Main worker loop: read queued directories until the queue disconnects.
fn worker_loop<R: EntryReader>(
    id: usize,
    reader: &R,
    work_rx: Receiver<PathBuf>,
    result_tx: Sender<DirResult>,
    cancelled: &AtomicBool,
) {
    trace!(worker = id, "worker starting");
    let mut read = 0u64;

    for path in work_rx.iter() {
        if cancelled.load(Ordering::Relaxed) {
            trace!(worker = id, path = %path.display(), "dropping queued directory after abort");
            continue;
        }

        let guard = ReportOnPanic {
            path: &path,
            results: &result_tx,
        };
        let entries = reader.read_entries(&path);
        drop(guard);
        read += 1;

        if result_tx.send(DirResult { path, entries }).is_err() {
            break;
        }
    }

    trace!(worker = id, dirs = read, "worker exiting");
}

/// Reports the in-flight directory as failed if the reader panics, so the
/// aggregator never waits on a result that will not arrive.
struct ReportOnPanic<'a> {
    path: &'a Path,
    results: &'a Sender<DirResult>,
}

impl Drop for ReportOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            let _ = self.results.send(DirResult {
                path: self.path.to_path_buf(),
                entries: Err(io::Error::other("entry reader panicked")),
            });
        }
    }
}

/// Turn a user-supplied path into the absolute, normalized root the walker expects.
///
/// Relative paths are resolved against the current directory. The result is
/// cleaned lexically: `.` components and trailing separators are dropped and
/// each `..` removes the component before it. Symlinks are not resolved.
pub fn resolve_root(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // `..` at the filesystem root stays at the root
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}
