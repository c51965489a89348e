use std::ops::Range;

use apollo_parser::cst::{self, CstNode};

use crate::ast::StringValue;

use super::error::ParseError;
use super::syntax::{is_ignored, significant_text};

/// A significant token of the source text, as the canonical printer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceToken<'a> {
    Punctuator(&'a str),
    /// Names, keywords and numbers, verbatim.
    Lexical(&'a str),
    String(StringValue),
}

/// Calls `visit` for every significant token of `source`, in order.
///
/// The source is parsed first, so string literals come out decoded and an
/// anonymous `query` keyword is left out the same way the tree printer
/// leaves it out.
pub(crate) fn for_each_source_token(
    source: &str,
    mut visit: impl FnMut(SourceToken<'_>),
) -> Result<(), ParseError> {
    let tree = apollo_parser::Parser::new(source).parse();
    if let Some(error) = ParseError::from_syntax_errors(source, tree.errors()) {
        return Err(error);
    }

    let document = tree.document();
    let implicit_query_keywords: Vec<_> = document
        .definitions()
        .filter_map(|definition| match definition {
            cst::Definition::OperationDefinition(operation) => implicit_query_keyword(&operation),
            _ => None,
        })
        .collect();

    for token in document
        .syntax()
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
    {
        let text = token.text();
        let start = usize::from(token.text_range().start());
        if is_ignored(text)
            || implicit_query_keywords
                .iter()
                .any(|keyword| keyword.contains(&start))
        {
            continue;
        }

        if text.starts_with('"') {
            let Some(string) = token.parent().and_then(cst::StringValue::cast) else {
                return Err(ParseError::at_offset(
                    "Expected a string value",
                    source,
                    start,
                ));
            };
            visit(SourceToken::String(StringValue {
                value: String::from(string),
                block: text.starts_with(r#"""""#),
            }));
        } else if is_punctuator(text) {
            visit(SourceToken::Punctuator(text));
        } else {
            visit(SourceToken::Lexical(text));
        }
    }

    Ok(())
}

/// Byte range of the `query` keyword of an operation that prints as `{ ... }`.
fn implicit_query_keyword(operation: &cst::OperationDefinition) -> Option<Range<usize>> {
    if operation.name().is_some()
        || operation.variable_definitions().is_some()
        || operation.directives().is_some()
    {
        return None;
    }

    let operation_type = operation.operation_type()?;
    let range = operation_type.syntax().text_range();
    (significant_text(&operation_type) == "query")
        .then(|| usize::from(range.start())..usize::from(range.end()))
}

fn is_punctuator(text: &str) -> bool {
    matches!(
        text,
        "!" | "$" | "&" | "(" | ")" | "..." | ":" | "=" | "@" | "[" | "]" | "{" | "|" | "}"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tokens(source: &str) -> Vec<String> {
        let mut collected = vec![];
        for_each_source_token(source, |token| {
            collected.push(match token {
                SourceToken::Punctuator(text) => text.to_string(),
                SourceToken::Lexical(text) => format!("<{text}>"),
                SourceToken::String(value) => format!("{:?}/{}", value.value, value.block),
            })
        })
        .expect("to walk tokens");
        collected
    }

    #[test]
    fn skips_ignored_tokens() {
        assert_eq!(
            tokens("{ a, # comment\n b(x: -1.5) }"),
            vec!["{", "<a>", "<b>", "(", "<x>", ":", "<-1.5>", ")", "}"]
        );
    }

    #[test]
    fn decodes_strings() {
        assert_eq!(
            tokens(r#"{ a(s: "x\ty", b: """  z  """) }"#),
            vec![
                "{", "<a>", "(", "<s>", ":", "\"x\\ty\"/false", "<b>", ":", "\"  z  \"/true", ")",
                "}",
            ]
        );
    }

    #[test]
    fn drops_only_implicit_query_keywords() {
        assert_eq!(tokens("query { a }"), vec!["{", "<a>", "}"]);
        assert_eq!(
            tokens("query Q { query }"),
            vec!["<query>", "<Q>", "{", "<query>", "}"]
        );
        assert_eq!(tokens("mutation { a }"), vec!["<mutation>", "{", "<a>", "}"]);
        assert_eq!(
            tokens("query @live { a }"),
            vec!["<query>", "@", "<live>", "{", "<a>", "}"]
        );
    }

    #[test]
    fn reports_syntax_errors() {
        let error = for_each_source_token("{ a; }", |_| {}).unwrap_err();
        assert_eq!(error.position.line, 1);
    }
}
