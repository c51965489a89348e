use tracing::{instrument, trace};

use crate::ast::{Definition, Directive, Document, Selection, SelectionSet};

/// Drops aliases equal to the field name and unwraps inline fragments
/// without a type condition whose directives are known statically.
///
/// Works bottom-up, so a fragment is judged after everything below it has
/// been flattened.
#[instrument(level = "trace", skip_all)]
pub fn flatten_selections(document: &Document) -> Document {
    let mut document = document.clone();

    for definition in &mut document.definitions {
        match definition {
            Definition::Operation(op) => handle_selection_set(&mut op.selection_set),
            Definition::Fragment(fragment) => handle_selection_set(&mut fragment.selection_set),
        }
    }

    document
}

fn handle_selection_set(selection_set: &mut SelectionSet) {
    let old_items = std::mem::take(&mut selection_set.items);
    let mut new_items = Vec::with_capacity(old_items.len());

    for selection in old_items {
        match selection {
            Selection::Field(mut field) => {
                if field.alias.as_deref() == Some(field.name.as_str()) {
                    trace!(field = %field.name, "dropping alias equal to field name");
                    field.alias = None;
                }
                if let Some(nested) = field.selection_set.as_mut() {
                    handle_selection_set(nested);
                }
                new_items.push(Selection::Field(field));
            }
            Selection::InlineFragment(mut fragment) => {
                handle_selection_set(&mut fragment.selection_set);

                if fragment.type_condition.is_some() {
                    new_items.push(Selection::InlineFragment(fragment));
                    continue;
                }

                match static_inclusion(&fragment.directives) {
                    Inclusion::Never => {
                        trace!("dropping statically skipped inline fragment");
                    }
                    Inclusion::Always => {
                        trace!("splicing inline fragment into parent");
                        new_items.extend(fragment.selection_set.items);
                    }
                    Inclusion::Conditional => {
                        new_items.push(Selection::InlineFragment(fragment));
                    }
                }
            }
            Selection::FragmentSpread(spread) => new_items.push(Selection::FragmentSpread(spread)),
        }
    }

    selection_set.items = new_items;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inclusion {
    Always,
    Never,
    Conditional,
}

/// Decides from literal `@skip`/`@include` arguments alone.
///
/// A fragment is dropped only when its single directive excludes it, and
/// spliced only when every directive it carries includes it. Any other
/// directive next to `@skip`/`@include`, such as `@defer`, keeps the whole
/// fragment as written.
fn static_inclusion(directives: &[Directive]) -> Inclusion {
    if let [directive] = directives {
        if is_trivially_excluded(directive) {
            return Inclusion::Never;
        }
    }

    if directives.iter().all(is_trivially_included) {
        return Inclusion::Always;
    }

    Inclusion::Conditional
}

fn literal_condition(directive: &Directive) -> Option<bool> {
    directive.argument("if")?.as_bool()
}

/// `@skip(if: true)` and `@include(if: false)`.
fn is_trivially_excluded(directive: &Directive) -> bool {
    match directive.name.as_str() {
        "skip" => literal_condition(directive) == Some(true),
        "include" => literal_condition(directive) == Some(false),
        _ => false,
    }
}

/// `@skip(if: false)` and `@include(if: true)` change nothing.
fn is_trivially_included(directive: &Directive) -> bool {
    match directive.name.as_str() {
        "skip" => literal_condition(directive) == Some(false),
        "include" => literal_condition(directive) == Some(true),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;
    use crate::printer::canonical_print;

    fn flatten(source: &str) -> String {
        let document = parse_query(source).expect("to parse");
        canonical_print(&flatten_selections(&document))
    }

    #[test]
    fn drops_alias_equal_to_name() {
        assert_eq!(
            flatten("{ user(id: 4) { name: name nick: name } }"),
            "{user(id:4){name nick:name}}"
        );
    }

    #[test]
    fn splices_bare_fragments() {
        assert_eq!(flatten("{ a ... { b ... { c } } d }"), "{a b c d}");
    }

    #[test]
    fn constant_directives() {
        assert_eq!(
            flatten(
                "{ user(id: 4) { name ... @skip(if: true) { birthday } ... @skip(if: false) { friends { name } } } }"
            ),
            "{user(id:4){name friends{name}}}"
        );
        assert_eq!(
            flatten("{ a ... @include(if: false) { b } ... @include(if: true) { c } }"),
            "{a c}"
        );
    }

    #[test]
    fn directive_combinations_are_left_as_written() {
        assert_eq!(
            flatten("{ a ... @defer @skip(if: true) { b } }"),
            "{a ...@defer@skip(if:true){b}}"
        );
        assert_eq!(
            flatten("{ a ... @include(if: true) @defer { b } }"),
            "{a ...@include(if:true)@defer{b}}"
        );
        assert_eq!(
            flatten("{ a ... @skip(if: true) @include(if: true) { b } }"),
            "{a ...@skip(if:true)@include(if:true){b}}"
        );
    }

    #[test]
    fn trivially_true_combinations_are_spliced() {
        assert_eq!(
            flatten("{ a ... @skip(if: false) @include(if: true) { b } }"),
            "{a b}"
        );
    }

    #[test]
    fn leaves_variable_conditions_and_type_conditions() {
        assert_eq!(
            flatten("{ a ... @skip(if: $s) { b } ... on T { c } ... on T @skip(if: true) { d } }"),
            "{a ...@skip(if:$s){b}...on T{c}...on T@skip(if:true){d}}"
        );
    }

    #[test]
    fn nested_fragments_flatten_first() {
        assert_eq!(
            flatten("{ ... @skip(if: $s) { ... @include(if: true) { a } } }"),
            "{...@skip(if:$s){a}}"
        );
    }
}
