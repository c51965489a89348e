pub mod ast;
pub mod comparison;
pub mod hash;
pub mod normalization;
pub mod parser;
pub mod printer;
pub mod schema;
pub mod utils;

#[cfg(test)]
mod tests;

pub use normalization::{
    config::NormalizerConfig, error::NormalizationError, normalize, normalize_str,
    normalize_str_with_config, normalize_with_config,
};
pub use printer::{canonical_print, canonical_print_str};
pub use schema::{SchemaIndex, SchemaOracle};
