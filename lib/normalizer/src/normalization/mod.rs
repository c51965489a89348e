//! The normalization pipeline.
//!
//! Stages run in a fixed order, each taking a document and returning a new
//! one:
//!
//! 1. [`inline_fragment_spreads`]
//! 2. [`drop_redundant_type_conditions`]
//! 3. [`flatten_selections`]
//! 4. [`deduplicate_selections`]
//! 5. [`canonicalize_strings`]

pub mod config;
pub mod error;
mod pipeline;

pub use pipeline::{
    canonicalize_strings, deduplicate_selections, drop_redundant_type_conditions,
    flatten_selections, inline_fragment_spreads,
};

use tracing::{debug, instrument};

use crate::ast::Document;
use crate::parser::{parse_query_with_limit, ParseLimits};
use crate::schema::SchemaOracle;
use config::NormalizerConfig;
use error::NormalizationError;

pub fn normalize<S: SchemaOracle + ?Sized>(
    document: &Document,
    schema: &S,
) -> Result<Document, NormalizationError> {
    normalize_with_config(document, schema, &NormalizerConfig::default())
}

/// Parses `source` and normalizes the result.
pub fn normalize_str<S: SchemaOracle + ?Sized>(
    source: &str,
    schema: &S,
) -> Result<Document, NormalizationError> {
    normalize_str_with_config(source, schema, &NormalizerConfig::default())
}

#[instrument(level = "trace", skip_all)]
pub fn normalize_with_config<S: SchemaOracle + ?Sized>(
    document: &Document,
    schema: &S,
    config: &NormalizerConfig,
) -> Result<Document, NormalizationError> {
    if document.depth() > config.max_depth {
        return Err(NormalizationError::DepthLimitExceeded {
            limit: config.max_depth,
        });
    }

    let document = inline_fragment_spreads(document, config)?;
    let document = drop_redundant_type_conditions(&document, schema);
    let document = flatten_selections(&document);
    let document = deduplicate_selections(&document, schema, config);
    let document = canonicalize_strings(&document);

    debug!(
        selections = document
            .operations()
            .map(|op| op.selection_set.selection_count())
            .sum::<usize>(),
        "normalized document"
    );

    Ok(document)
}

pub fn normalize_str_with_config<S: SchemaOracle + ?Sized>(
    source: &str,
    schema: &S,
    config: &NormalizerConfig,
) -> Result<Document, NormalizationError> {
    let limits = ParseLimits {
        max_tokens: config.max_tokens,
        max_depth: config.max_depth,
    };
    let document = parse_query_with_limit(source, limits)?;
    normalize_with_config(&document, schema, config)
}
