use std::fmt::{self, Display, Formatter};

/// Leading whitespace for a nesting level, two spaces per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(pub usize);

impl Display for Indent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            f.write_str("  ")?;
        }
        Ok(())
    }
}

/// Indented multi-line rendering of document nodes, for logs and the dev
/// CLI. The canonical form comes from the printer instead.
pub trait PrettyDisplay {
    fn pretty_fmt(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result;

    /// Renders the node starting at nesting level zero.
    fn pretty(&self) -> String
    where
        Self: Sized,
    {
        Pretty(self).to_string()
    }
}

struct Pretty<'a, T>(&'a T);

impl<T: PrettyDisplay> Display for Pretty<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.pretty_fmt(f, 0)
    }
}
