//! Persisted-operation keys: xxh3 of the canonical printed form.

use xxhash_rust::xxh3::xxh3_64;

use crate::ast::Document;
use crate::normalization::{error::NormalizationError, normalize_str};
use crate::printer::canonical_print;
use crate::schema::SchemaOracle;

pub fn operation_hash(document: &Document) -> u64 {
    xxh3_64(canonical_print(document).as_bytes())
}

/// [`operation_hash`] as 16 lowercase hex digits.
pub fn operation_hash_hex(document: &Document) -> String {
    format!("{:016x}", operation_hash(document))
}

/// Normalizes `source` and hashes the result.
pub fn normalized_operation_hash<S: SchemaOracle + ?Sized>(
    source: &str,
    schema: &S,
) -> Result<u64, NormalizationError> {
    let document = normalize_str(source, schema)?;
    Ok(operation_hash(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;

    #[test]
    fn hash_ignores_formatting() {
        let a = parse_query("{ a, b }").expect("to parse");
        let b = parse_query("{\n  a\n  b # comment\n}").expect("to parse");
        assert_eq!(operation_hash(&a), operation_hash(&b));
        assert_ne!(
            operation_hash(&a),
            operation_hash(&parse_query("{ b a }").expect("to parse"))
        );
    }

    #[test]
    fn hex_is_zero_padded() {
        let document = parse_query("{ a }").expect("to parse");
        let hex = operation_hash_hex(&document);
        assert_eq!(hex.len(), 16);
        assert_eq!(u64::from_str_radix(&hex, 16), Ok(operation_hash(&document)));
    }
}
