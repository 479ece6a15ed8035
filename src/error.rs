//! Error types and failure classification for tree traversal
//!
//! Directory read failures fall into two classes:
//! - Recoverable (permission denied, not found): the directory is recorded
//!   with no entries and traversal keeps going
//! - Fatal (any other I/O error): traversal aborts and the error reaches the caller

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// How a directory read failure affects the rest of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Recoverable,
    Fatal,
}

/// Classify a directory read failure.
pub fn classify(err: &io::Error) -> ErrorClass {
    match err.kind() {
        io::ErrorKind::PermissionDenied | io::ErrorKind::NotFound => ErrorClass::Recoverable,
        _ => ErrorClass::Fatal,
    }
}

/// Fatal traversal failures. Recoverable failures never surface as this type;
/// they are folded into `TraversalStatus::Partial`.
#[derive(Error, Debug)]
pub enum WalkError {
    /// The root directory itself could not be read
    #[error("cannot read root '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory failed with an error outside the recoverable set
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Abort-on-error mode stopped at the first failure
    #[error("aborted at '{}': {source}", path.display())]
    Aborted {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A worker thread could not be started
    #[error("failed to spawn worker {id}: {source}")]
    WorkerSpawn {
        id: usize,
        #[source]
        source: io::Error,
    },

    /// Every worker stopped while directories were still outstanding
    #[error("all workers exited with {outstanding} directories outstanding")]
    WorkersExited { outstanding: usize },
}

impl WalkError {
    /// The directory the failure happened on, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            WalkError::RootUnreadable { path, .. }
            | WalkError::Io { path, .. }
            | WalkError::Aborted { path, .. } => Some(path),
            WalkError::WorkerSpawn { .. } | WalkError::WorkersExited { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_and_not_found_are_recoverable() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(classify(&denied), ErrorClass::Recoverable);
        assert_eq!(classify(&missing), ErrorClass::Recoverable);
    }

    #[test]
    fn test_other_errors_are_fatal() {
        for kind in [
            io::ErrorKind::Other,
            io::ErrorKind::InvalidData,
            io::ErrorKind::Interrupted,
            io::ErrorKind::OutOfMemory,
        ] {
            assert_eq!(classify(&io::Error::from(kind)), ErrorClass::Fatal, "{:?}", kind);
        }
    }

    #[test]
    fn test_error_message_names_path() {
        let err = WalkError::RootUnreadable {
            path: PathBuf::from("/no/such/dir"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/no/such/dir"));
        assert_eq!(err.path(), Some(&PathBuf::from("/no/such/dir")));
    }
}
