use thiserror::Error;

use super::position::Pos;

/// Error tokenizing or parsing an executable document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {position}")]
pub struct ParseError {
    pub message: String,
    pub position: Pos,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, position: Pos) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub(crate) fn at_offset(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self::new(message, Pos::from_offset(source, offset))
    }

    /// Keeps the first syntax error of a tree; the rest are usually cascades of it.
    pub(crate) fn from_syntax_errors<'e>(
        source: &str,
        mut errors: impl Iterator<Item = &'e apollo_parser::Error>,
    ) -> Option<Self> {
        let error = errors.next()?;
        let message = match error.data() {
            "" | "EOF" => error.message().to_string(),
            data => format!("{}, found \"{}\"", error.message(), data),
        };

        Some(Self::at_offset(message, source, error.index()))
    }
}
