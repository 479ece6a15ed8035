//! Output configuration types

use std::collections::BTreeSet;
use std::ffi::OsStr;

/// Directory names that are listed but never descended into unless overridden.
pub const DEFAULT_IGNORE_NAMES: &[&str] = &[".git", ".cache"];

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Print each entry's absolute path instead of an indented name
    pub full_path: bool,
    /// Leave files out of the listing and the totals
    pub dirs_only: bool,
    /// Append a directory/file count after the listing
    pub show_totals: bool,
    /// Directory base names whose contents are not rendered
    pub ignore_names: BTreeSet<String>,
}

impl OutputConfig {
    /// Check if a directory name is in the ignore set. Names that are not
    /// valid UTF-8 never match.
    pub fn is_ignored(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.ignore_names.contains(name))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            full_path: false,
            dirs_only: false,
            show_totals: false,
            ignore_names: DEFAULT_IGNORE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
