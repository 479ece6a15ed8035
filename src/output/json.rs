//! JSON output formatting

use std::io::{self, Write};

use super::tree::Rendering;

/// Write a rendering as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, rendering: &Rendering) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, rendering).map_err(io::Error::other)?;
    writeln!(out)?;
    out.flush()
}
