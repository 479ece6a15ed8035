//! Configuration types for the tree walker

/// Default capacity of the pending-directory queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 128;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Number of worker threads reading directories.
    /// 0 = auto-detect (use available parallelism)
    /// N = use N worker threads
    pub parallel_workers: usize,
    /// Capacity of the bounded queue feeding the workers
    pub queue_capacity: usize,
    /// Stop at the first failed directory instead of collecting a partial tree
    pub abort_on_error: bool,
}

impl WalkerConfig {
    /// Resolve the number of worker threads to spawn (always at least 1).
    pub fn worker_count(&self) -> usize {
        if self.parallel_workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.parallel_workers
        }
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 0,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            abort_on_error: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_worker_count_is_positive() {
        let config = WalkerConfig::default();
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_explicit_worker_count() {
        let config = WalkerConfig {
            parallel_workers: 3,
            ..Default::default()
        };
        assert_eq!(config.worker_count(), 3);
    }
}
