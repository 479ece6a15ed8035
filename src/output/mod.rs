//! Tree formatting and display
//!
//! This module turns a completed `DirectoryTree` into output:
//! - Text listing, indented or full-path, optionally colored
//! - JSON output
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `paint` - Terminal colors per entry role
//! - `tree` - Depth-first renderer and line formatting
//! - `json` - JSON output

mod config;
mod json;
mod paint;
mod tree;

// Re-export public types and functions
pub use config::{DEFAULT_IGNORE_NAMES, OutputConfig};
pub use json::write_json;
pub use paint::{Painter, Role};
pub use tree::{NodeKind, RenderedNode, Rendering, TreeFormatter, depth_prefix, format_totals};
