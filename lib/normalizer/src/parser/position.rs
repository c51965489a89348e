use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based line and column of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

impl Pos {
    /// Position of the byte `offset` in `source`. Columns count characters,
    /// and `\n`, `\r\n` and `\r` all end a line.
    pub(crate) fn from_offset(source: &str, offset: usize) -> Pos {
        let mut end = offset.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }

        let mut pos = Pos::default();
        let mut after_cr = false;
        for c in source[..end].chars() {
            match c {
                '\n' if after_cr => {}
                '\n' | '\r' => {
                    pos.line += 1;
                    pos.column = 1;
                }
                _ => pos.column += 1,
            }
            after_cr = c == '\r';
        }
        pos
    }
}

impl Default for Pos {
    fn default() -> Self {
        Pos { line: 1, column: 1 }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
