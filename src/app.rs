//! One complete invocation: resolve the root, walk it, render the result
//!
//! The binary is a thin layer over `run`, which takes an explicit `Request`
//! and an output stream so that several invocations never share state.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing::warn;

use crate::error::WalkError;
use crate::output::{OutputConfig, TreeFormatter, write_json};
use crate::tree::{TraversalStatus, TreeWalker, WalkerConfig, resolve_root};

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Bad arguments, unresolvable root or logging setup failure
    Initialize,
    /// Some directories could not be read; the listing was still printed
    Partial,
    /// Writing the listing failed
    Output,
    /// Traversal aborted; nothing was printed
    Traversal,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Initialize => 1,
            ExitStatus::Partial => 2,
            ExitStatus::Output => 3,
            ExitStatus::Traversal => 4,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Everything needed for one invocation.
#[derive(Debug, Clone)]
pub struct Request {
    /// Root as given by the user; made absolute before walking
    pub root: PathBuf,
    pub walker: WalkerConfig,
    pub output: OutputConfig,
    /// Print JSON instead of the text listing
    pub json: bool,
}

/// Failures that end an invocation.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("cannot resolve '{}': {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("error writing output: {0}")]
    Output(#[source] io::Error),
}

impl RunError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            RunError::Root { .. } => ExitStatus::Initialize,
            RunError::Walk(_) => ExitStatus::Traversal,
            RunError::Output(_) => ExitStatus::Output,
        }
    }
}

/// Summary of a successful invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub status: TraversalStatus,
    pub directories: usize,
    pub files: usize,
}

impl Report {
    pub fn exit_status(&self) -> ExitStatus {
        match self.status {
            TraversalStatus::Ok => ExitStatus::Success,
            TraversalStatus::Partial => ExitStatus::Partial,
        }
    }
}

/// Walk `request.root` and write the listing to `out`.
///
/// A partial traversal still writes its listing. A fatal traversal error
/// writes nothing.
pub fn run<W: Write>(out: &mut W, request: &Request) -> Result<Report, RunError> {
    let root = resolve_root(&request.root).map_err(|source| RunError::Root {
        path: request.root.clone(),
        source,
    })?;

    let outcome = TreeWalker::new(request.walker.clone()).walk(&root)?;
    if outcome.is_partial() {
        warn!(
            permission_denied = outcome.failures.permission_denied,
            not_found = outcome.failures.not_found,
            "listing is incomplete"
        );
    }

    let formatter = TreeFormatter::new(request.output.clone());
    let rendering = formatter.render(&outcome.tree, &outcome.root);

    let written = if request.json {
        write_json(out, &rendering)
    } else {
        formatter.write(out, &rendering)
    };
    written.map_err(RunError::Output)?;

    Ok(Report {
        status: outcome.status(),
        directories: rendering.directories,
        files: rendering.files,
    })
}
