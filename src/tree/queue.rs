//! Pending-directory bookkeeping for the concurrent walker
//!
//! Workers pull directory paths from a bounded queue. Newly discovered
//! directories never block anyone: they land in a backlog owned by the
//! aggregator, which moves them into the queue whenever it has room. While
//! waiting for a result the aggregator also waits for room in the queue, so
//! idle workers are fed as soon as any of them takes a path.
//!
//! The outstanding-work counter tracks every scheduled directory until its
//! result has been recorded and its children scheduled. Traversal is complete
//! exactly when it drops to zero.

use std::collections::VecDeque;
use std::path::PathBuf;

use crossbeam_channel::{Receiver, RecvError, Select, Sender, TrySendError};

/// Statistics for the work queue
#[derive(Debug, Default, Clone, Copy)]
pub struct QueueStats {
    /// Paths handed to workers
    pub enqueued: u64,
    /// Times the queue was full and paths had to wait in the backlog
    pub backpressure_events: u64,
    /// Largest backlog seen
    pub peak_backlog: usize,
}

/// Scheduler for directories that still need to be read.
pub struct PendingWork {
    sender: Option<Sender<PathBuf>>,
    backlog: VecDeque<PathBuf>,
    outstanding: usize,
    stats: QueueStats,
}

impl PendingWork {
    pub fn new(sender: Sender<PathBuf>) -> Self {
        Self {
            sender: Some(sender),
            backlog: VecDeque::new(),
            outstanding: 0,
            stats: QueueStats::default(),
        }
    }

    /// Schedule a directory for reading.
    pub fn schedule(&mut self, path: PathBuf) {
        self.outstanding += 1;
        self.backlog.push_back(path);
        self.stats.peak_backlog = self.stats.peak_backlog.max(self.backlog.len());
    }

    /// Mark one scheduled directory as fully processed.
    ///
    /// Must only be called after that directory's children were scheduled.
    /// Returns true when no work remains.
    pub fn complete(&mut self) -> bool {
        debug_assert!(self.outstanding > 0, "completed more directories than scheduled");
        self.outstanding = self.outstanding.saturating_sub(1);
        self.is_done()
    }

    /// Move as many backlog paths into the queue as it can take without blocking.
    ///
    /// Returns the number of paths sent.
    pub fn flush(&mut self) -> usize {
        let Some(sender) = &self.sender else {
            return 0;
        };

        let mut sent = 0;
        while let Some(path) = self.backlog.pop_front() {
            match sender.try_send(path) {
                Ok(()) => sent += 1,
                Err(TrySendError::Full(path)) => {
                    self.backlog.push_front(path);
                    self.stats.backpressure_events += 1;
                    break;
                }
                // No worker left to read anything; the aggregator notices
                // through its result channel.
                Err(TrySendError::Disconnected(_)) => {
                    self.backlog.clear();
                    break;
                }
            }
        }
        self.stats.enqueued += sent as u64;
        sent
    }

    /// Block until a result arrives on `results`, moving backlog paths into
    /// the queue whenever it has room in the meantime.
    pub fn recv_result<T>(&mut self, results: &Receiver<T>) -> Result<T, RecvError> {
        loop {
            self.flush();

            let Some(sender) = &self.sender else {
                return results.recv();
            };
            // Backlog left after a flush means the queue is full
            let Some(path) = self.backlog.pop_front() else {
                return results.recv();
            };

            let mut select = Select::new();
            select.send(sender);
            let recv_op = select.recv(results);
            let oper = select.select();
            if oper.index() == recv_op {
                self.backlog.push_front(path);
                return oper.recv(results);
            }
            match oper.send(sender, path) {
                Ok(()) => self.stats.enqueued += 1,
                // No worker left; the next receive reports it
                Err(_) => self.backlog.clear(),
            }
        }
    }

    /// Stop feeding workers. Dropping the sender lets them exit once the queue drains.
    pub fn close(&mut self) {
        self.sender = None;
        self.backlog.clear();
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn is_done(&self) -> bool {
        self.outstanding == 0
    }

    pub fn stats(&self) -> QueueStats {
        self.stats
    }
}
