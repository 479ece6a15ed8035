//! Terminal colors for rendered entries

use std::io::{self, Write};

use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// What a piece of output represents, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Directory,
    IgnoredDirectory,
    Symlink,
    Plain,
}

impl Role {
    pub fn color(self) -> Option<Color> {
        match self {
            Role::Directory => Some(Color::Cyan),
            Role::IgnoredDirectory => Some(Color::Red),
            Role::Symlink => Some(Color::Green),
            Role::Plain => None,
        }
    }
}

/// Wraps text in ANSI color sequences. Returns text unchanged when disabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, role: Role) -> String {
        let Some(color) = role.color().filter(|_| self.enabled) else {
            return text.to_string();
        };

        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color));

        let mut out = Ansi::new(Vec::with_capacity(text.len() + 16));
        match write_colored(&mut out, text, &spec) {
            Ok(()) => String::from_utf8(out.into_inner()).unwrap_or_else(|_| text.to_string()),
            Err(_) => text.to_string(),
        }
    }
}

fn write_colored<W: WriteColor>(out: &mut W, text: &str, spec: &ColorSpec) -> io::Result<()> {
    out.set_color(spec)?;
    write!(out, "{}", text)?;
    out.reset()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_painter_is_identity() {
        let painter = Painter::new(false);
        for role in [Role::Directory, Role::IgnoredDirectory, Role::Symlink, Role::Plain] {
            assert_eq!(painter.paint("name/", role), "name/");
        }
    }

    #[test]
    fn test_plain_role_is_never_colored() {
        assert_eq!(Painter::new(true).paint("file", Role::Plain), "file");
    }

    #[test]
    fn test_enabled_painter_wraps_in_escapes() {
        let painter = Painter::new(true);
        let dir = painter.paint("src/", Role::Directory);
        let ignored = painter.paint("src/", Role::IgnoredDirectory);

        assert!(dir.contains("src/"));
        assert!(dir.contains('\x1b'));
        assert!(dir.ends_with("\x1b[0m"));
        assert_ne!(dir, ignored);
    }
}
