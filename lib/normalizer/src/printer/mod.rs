//! Minimal-whitespace serialization.
//!
//! Two tokens are separated by a single space only when the output would
//! otherwise lex differently or run two words together:
//!
//! - before a spread (`...`), when the previous token is a lexical token
//!   (name, number, string)
//! - between any two lexical tokens
//!
//! No other ignored tokens (newlines, commas, comments) are ever written.

mod canonical;
mod escape;

pub(crate) use canonical::CanonicalPrinter;

use crate::ast::Document;
use crate::parser::{for_each_source_token, ParseError};

/// Prints a document in canonical form, straight from the tree.
pub fn canonical_print(document: &Document) -> String {
    print_node(|printer| printer.write_document(document))
}

/// Re-emits the tokens of `source` with canonical spacing and string escaping.
///
/// Definitions and selections keep their source order; only the spacing,
/// string escapes and an anonymous `query` keyword change, so the result is
/// the same text [`canonical_print`] gives for the parsed document.
pub fn canonical_print_str(source: &str) -> Result<String, ParseError> {
    let mut printer = CanonicalPrinter::new();
    for_each_source_token(source, |token| printer.write_source_token(token))?;
    Ok(printer.finish())
}

pub(crate) fn print_node(write: impl FnOnce(&mut CanonicalPrinter)) -> String {
    let mut printer = CanonicalPrinter::new();
    write(&mut printer);
    printer.finish()
}
