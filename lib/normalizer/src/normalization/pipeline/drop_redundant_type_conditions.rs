use tracing::{instrument, trace};

use crate::ast::{Definition, Document, Selection, SelectionSet};
use crate::schema::SchemaOracle;

/// Removes the type condition of inline fragments that are typed exactly
/// like the selection set they are in.
#[instrument(level = "trace", skip_all)]
pub fn drop_redundant_type_conditions<S: SchemaOracle + ?Sized>(
    document: &Document,
    schema: &S,
) -> Document {
    let mut document = document.clone();

    for definition in &mut document.definitions {
        match definition {
            Definition::Operation(op) => {
                let root_type = schema.root_type(op.kind);
                handle_selection_set(&mut op.selection_set, root_type, schema);
            }
            Definition::Fragment(fragment) => {
                handle_selection_set(
                    &mut fragment.selection_set,
                    Some(fragment.type_condition.as_str()),
                    schema,
                );
            }
        }
    }

    document
}

fn handle_selection_set<S: SchemaOracle + ?Sized>(
    selection_set: &mut SelectionSet,
    parent_type: Option<&str>,
    schema: &S,
) {
    for selection in &mut selection_set.items {
        match selection {
            Selection::Field(field) => {
                if let Some(nested) = field.selection_set.as_mut() {
                    let field_type =
                        parent_type.and_then(|parent| schema.output_type(parent, &field.name));
                    handle_selection_set(nested, field_type, schema);
                }
            }
            Selection::InlineFragment(fragment) => {
                if fragment.type_condition.is_some()
                    && fragment.type_condition.as_deref() == parent_type
                {
                    trace!(type_condition = ?fragment.type_condition, "dropping redundant type condition");
                    fragment.type_condition = None;
                }
                handle_selection_set(
                    &mut fragment.selection_set,
                    fragment.type_condition.as_deref().or(parent_type),
                    schema,
                );
            }
            Selection::FragmentSpread(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;
    use crate::printer::canonical_print;
    use crate::schema::SchemaIndex;

    const SDL: &str = r#"
        type Query { user: User node: Node }
        interface Node { id: ID! }
        type User implements Node { id: ID! name: String best: User }
    "#;

    fn drop_conditions(source: &str) -> String {
        let schema = SchemaIndex::from_sdl(SDL).expect("schema to parse");
        let document = parse_query(source).expect("to parse");
        canonical_print(&drop_redundant_type_conditions(&document, &schema))
    }

    #[test]
    fn drops_condition_matching_the_enclosing_type() {
        assert_eq!(
            drop_conditions("{ user { ... on User @defer { name } } }"),
            "{user{...@defer{name}}}"
        );
    }

    #[test]
    fn keeps_conditions_that_narrow_the_type() {
        assert_eq!(
            drop_conditions("{ node { ... on User { name } ... on Node { id } } }"),
            "{node{...on User{name}...{id}}}"
        );
    }

    #[test]
    fn follows_fragment_and_field_types() {
        assert_eq!(
            drop_conditions(
                "{ node { ... on User { best { ... on User { name } } ... on User { id } } } }"
            ),
            "{node{...on User{best{...{name}}...{id}}}}"
        );
    }

    #[test]
    fn root_type_counts_as_enclosing_type() {
        assert_eq!(
            drop_conditions("query { ... on Query { user { id } } }"),
            "{...{user{id}}}"
        );
    }

    #[test]
    fn unknown_fields_leave_conditions_alone() {
        assert_eq!(
            drop_conditions("{ missing { ... on User { id } } }"),
            "{missing{...on User{id}}}"
        );
    }
}
