//! Executable document parser.
//!
//! Built on the `apollo-parser` syntax tree, which is lossless: numbers keep
//! their literal text, object fields keep their order and strings remember
//! whether they were written as block strings.

mod document_builder;
mod error;
mod position;
mod source_tokens;
mod syntax;

pub use document_builder::{parse_query, parse_query_with_limit, ParseLimits, DEFAULT_MAX_DEPTH};
pub use error::ParseError;
pub use position::Pos;
pub(crate) use source_tokens::{for_each_source_token, SourceToken};
