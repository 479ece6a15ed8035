//! Tree formatter for a completed traversal
//!
//! Walks a `DirectoryTree` depth-first from the root and produces one node per
//! visible entry, in the order the entries were read. Ignored directories are
//! listed but never opened. Formatting into lines happens afterwards, so the
//! same nodes back the text and JSON outputs.

use std::io::{self, Write};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::tree::DirectoryTree;

use super::config::OutputConfig;
use super::paint::{Painter, Role};

/// Indentation for each level above the entry's own.
const INDENT: &str = " ";
/// Marker for the level closest to the entry.
const BRANCH: &str = " - ";

/// What kind of entry a rendered node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Directory,
    /// Directory whose name is in the ignore set; its contents are not listed
    IgnoredDirectory,
    Symlink,
    File,
}

impl NodeKind {
    pub fn is_dir(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::IgnoredDirectory)
    }

    fn role(self) -> Role {
        match self {
            NodeKind::Directory => Role::Directory,
            NodeKind::IgnoredDirectory => Role::IgnoredDirectory,
            NodeKind::Symlink => Role::Symlink,
            NodeKind::File => Role::Plain,
        }
    }
}

/// One visible entry of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedNode {
    /// Display name; bytes that are not valid UTF-8 are replaced
    pub name: String,
    #[serde(serialize_with = "serialize_lossy")]
    pub path: PathBuf,
    /// 0 for direct children of the root
    pub depth: usize,
    pub kind: NodeKind,
}

fn serialize_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// All visible entries in pre-order plus the totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rendering {
    pub nodes: Vec<RenderedNode>,
    pub directories: usize,
    pub files: usize,
}

/// Formatter for a completed directory tree.
pub struct TreeFormatter {
    config: OutputConfig,
    painter: Painter,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        let painter = Painter::new(config.use_color);
        Self { config, painter }
    }

    /// Collect the visible entries below `root`. The root itself is not listed.
    pub fn render(&self, tree: &DirectoryTree, root: &Path) -> Rendering {
        let mut rendering = Rendering::default();
        self.render_dir(tree, root, 0, &mut rendering);
        rendering
    }

    fn render_dir(&self, tree: &DirectoryTree, dir: &Path, depth: usize, out: &mut Rendering) {
        // A directory missing from the tree is listed with no children
        let Some(entries) = tree.entries(dir) else {
            return;
        };

        for entry in entries {
            let path = dir.join(&entry.name);
            let name = entry.name.to_string_lossy().into_owned();

            if entry.is_dir {
                let ignored = self.config.is_ignored(&entry.name);
                out.nodes.push(RenderedNode {
                    name,
                    path: path.clone(),
                    depth,
                    kind: if ignored {
                        NodeKind::IgnoredDirectory
                    } else {
                        NodeKind::Directory
                    },
                });
                out.directories += 1;
                if !ignored {
                    self.render_dir(tree, &path, depth + 1, out);
                }
                continue;
            }

            if self.config.dirs_only {
                continue;
            }
            out.nodes.push(RenderedNode {
                name,
                path,
                depth,
                kind: if entry.is_symlink {
                    NodeKind::Symlink
                } else {
                    NodeKind::File
                },
            });
            out.files += 1;
        }
    }

    /// Uncolored text for a node in the configured path mode.
    pub fn label(&self, node: &RenderedNode) -> String {
        let mut label = if self.config.full_path {
            node.path.display().to_string()
        } else {
            let mut s = depth_prefix(node.depth);
            s.push_str(&node.name);
            s
        };
        if node.kind.is_dir() {
            label.push(MAIN_SEPARATOR);
        }
        label
    }

    /// Output lines for a rendering, including the totals summary when enabled.
    pub fn lines(&self, rendering: &Rendering) -> Vec<String> {
        let mut lines: Vec<String> = rendering
            .nodes
            .iter()
            .map(|node| self.painter.paint(&self.label(node), node.kind.role()))
            .collect();

        if self.config.show_totals {
            lines.push(String::new());
            lines.push(format_totals(rendering.directories, rendering.files));
        }
        lines
    }

    /// Render `tree` to a single string, one entry per line.
    pub fn format(&self, tree: &DirectoryTree, root: &Path) -> String {
        let rendering = self.render(tree, root);
        let mut output = self.lines(&rendering).join("\n");
        output.push('\n');
        output
    }

    /// Write the lines of `rendering` to `out`, one entry per line.
    pub fn write<W: Write>(&self, out: &mut W, rendering: &Rendering) -> io::Result<()> {
        for line in self.lines(rendering) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}

/// Indentation and branch marker for an entry at `depth`.
pub fn depth_prefix(depth: usize) -> String {
    if depth == 0 {
        return String::new();
    }
    let mut prefix = INDENT.repeat(depth - 1);
    prefix.push_str(BRANCH);
    prefix
}

pub fn format_totals(directories: usize, files: usize) -> String {
    format!("{} directories, {} files", directories, files)
}
