use tracing::instrument;

use crate::ast::{Definition, Directive, Document, Selection, SelectionSet, Value};

/// Marks every string value as a regular string, content unchanged.
#[instrument(level = "trace", skip_all)]
pub fn canonicalize_strings(document: &Document) -> Document {
    let mut document = document.clone();

    for definition in &mut document.definitions {
        match definition {
            Definition::Operation(op) => {
                for variable in &mut op.variable_definitions {
                    if let Some(default_value) = variable.default_value.as_mut() {
                        handle_value(default_value);
                    }
                    handle_directives(&mut variable.directives);
                }
                handle_directives(&mut op.directives);
                handle_selection_set(&mut op.selection_set);
            }
            Definition::Fragment(fragment) => {
                handle_directives(&mut fragment.directives);
                handle_selection_set(&mut fragment.selection_set);
            }
        }
    }

    document
}

fn handle_selection_set(selection_set: &mut SelectionSet) {
    for selection in &mut selection_set.items {
        match selection {
            Selection::Field(field) => {
                for (_, value) in &mut field.arguments {
                    handle_value(value);
                }
                handle_directives(&mut field.directives);
                if let Some(nested) = field.selection_set.as_mut() {
                    handle_selection_set(nested);
                }
            }
            Selection::InlineFragment(fragment) => {
                handle_directives(&mut fragment.directives);
                handle_selection_set(&mut fragment.selection_set);
            }
            Selection::FragmentSpread(spread) => handle_directives(&mut spread.directives),
        }
    }
}

fn handle_directives(directives: &mut [Directive]) {
    for directive in directives {
        for (_, value) in &mut directive.arguments {
            handle_value(value);
        }
    }
}

fn handle_value(value: &mut Value) {
    match value {
        Value::String(string) => string.block = false,
        Value::List(items) => items.iter_mut().for_each(handle_value),
        Value::Object(fields) => fields.iter_mut().for_each(|(_, value)| handle_value(value)),
        _ => {}
    }
}
