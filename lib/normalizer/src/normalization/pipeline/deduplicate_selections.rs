use tracing::{debug, error, instrument};

use crate::ast::{Definition, Document, Selection, SelectionSet};
use crate::comparison::{selections_equal, selections_equivalent};
use crate::normalization::config::NormalizerConfig;
use crate::schema::SchemaOracle;

/// Merges equivalent sibling selections and, in interface-typed selection
/// sets, removes selections of inline fragments that are already selected
/// unconditionally next to them. Every selection set is processed until
/// none of the rules applies anymore.
#[instrument(level = "trace", skip_all)]
pub fn deduplicate_selections<S: SchemaOracle + ?Sized>(
    document: &Document,
    schema: &S,
    config: &NormalizerConfig,
) -> Document {
    let deduplicator = Deduplicator {
        schema,
        hoist_lagging_selections: config.hoist_lagging_selections,
    };
    let mut document = document.clone();

    for definition in &mut document.definitions {
        match definition {
            Definition::Operation(op) => {
                let root_type = schema.root_type(op.kind);
                deduplicator.deduplicate_set(&mut op.selection_set, root_type);
            }
            Definition::Fragment(fragment) => {
                deduplicator.deduplicate_set(
                    &mut fragment.selection_set,
                    Some(fragment.type_condition.as_str()),
                );
            }
        }
    }

    document
}

struct Deduplicator<'s, S: ?Sized> {
    schema: &'s S,
    hoist_lagging_selections: bool,
}

impl<S: SchemaOracle + ?Sized> Deduplicator<'_, S> {
    #[instrument(level = "trace", skip_all, fields(parent_type = parent_type.unwrap_or_default()))]
    fn deduplicate_set(&self, selection_set: &mut SelectionSet, parent_type: Option<&str>) {
        for selection in &mut selection_set.items {
            self.deduplicate_children(selection, parent_type);
        }

        let is_interface = parent_type.is_some_and(|name| self.schema.is_interface(name));
        // Every productive round removes at least one selection
        let max_rounds = selection_set.selection_count() + 1;
        let mut rounds = 0;

        loop {
            let merged = self.merge_equivalent(selection_set, parent_type);
            let trimmed = is_interface && remove_leading_redundancy(selection_set);
            let hoisted = is_interface
                && self.hoist_lagging_selections
                && hoist_lagging_redundancy(selection_set);

            if !(merged || trimmed || hoisted) {
                break;
            }

            rounds += 1;
            if rounds > max_rounds {
                error!(
                    rounds,
                    "selection deduplication did not reach a fixed point, keeping last state"
                );
                break;
            }
        }
    }

    fn deduplicate_children(&self, selection: &mut Selection, parent_type: Option<&str>) {
        match selection {
            Selection::Field(field) => {
                if let Some(nested) = field.selection_set.as_mut() {
                    let field_type =
                        parent_type.and_then(|parent| self.schema.output_type(parent, &field.name));
                    self.deduplicate_set(nested, field_type);
                }
            }
            Selection::InlineFragment(fragment) => {
                self.deduplicate_set(
                    &mut fragment.selection_set,
                    fragment.type_condition.as_deref().or(parent_type),
                );
            }
            Selection::FragmentSpread(_) => {}
        }
    }

    /// Folds every selection into the first equivalent one before it. The
    /// nested selections of the folded selection are appended to the kept
    /// one, which is then deduplicated again.
    fn merge_equivalent(&self, selection_set: &mut SelectionSet, parent_type: Option<&str>) -> bool {
        if selection_set.items.len() < 2 {
            return false;
        }

        let old_items = std::mem::take(&mut selection_set.items);
        let original_len = old_items.len();
        let mut new_items: Vec<Selection> = Vec::with_capacity(original_len);
        let mut grown = vec![];

        for selection in old_items {
            let existing = new_items
                .iter()
                .position(|kept| selections_equivalent(kept, &selection));

            let Some(index) = existing else {
                new_items.push(selection);
                continue;
            };

            debug!(selection = %selection, "merging equivalent selection");
            if let (Some(target), Some(source)) = (
                new_items[index].selection_set_mut(),
                selection.into_selection_set(),
            ) {
                target.items.extend(source.items);
                grown.push(index);
            }
        }

        grown.sort_unstable();
        grown.dedup();
        for index in grown {
            self.deduplicate_children(&mut new_items[index], parent_type);
        }

        let merged = new_items.len() < original_len;
        selection_set.items = new_items;
        merged
    }
}

/// Removes from each inline fragment the selections that are equal to a
/// sibling placed before the fragment. A fragment left empty is removed.
fn remove_leading_redundancy(selection_set: &mut SelectionSet) -> bool {
    let mut changed = false;
    let mut index = 0;

    while index < selection_set.items.len() {
        let (preceding, rest) = selection_set.items.split_at_mut(index);
        let Selection::InlineFragment(fragment) = &mut rest[0] else {
            index += 1;
            continue;
        };

        let body = &mut fragment.selection_set.items;
        let before = body.len();
        body.retain(|child| {
            !preceding
                .iter()
                .any(|sibling| selections_equal(sibling, child))
        });

        if body.len() < before {
            changed = true;
            debug!(
                removed = before - body.len(),
                "removed selections already selected before inline fragment"
            );
        }

        if body.is_empty() {
            selection_set.items.remove(index);
            continue;
        }
        index += 1;
    }

    changed
}

enum LaggingRedundancy {
    /// The last `n` selections of the fragment repeat the `n` siblings
    /// right after it.
    TrailingRun(usize),
    /// The first selection of the fragment equals the sibling right after it.
    First,
}

/// Trailing runs are removed from the fragment, the sibling after it already
/// selects them. A lagging first selection is removed from the fragment and
/// the sibling moves in front of the fragment.
fn hoist_lagging_redundancy(selection_set: &mut SelectionSet) -> bool {
    let mut changed = false;
    let mut index = 0;

    while index < selection_set.items.len() {
        let found = {
            let (head, following) = selection_set.items.split_at(index + 1);
            match &head[index] {
                Selection::InlineFragment(fragment) => {
                    find_lagging_redundancy(&fragment.selection_set.items, following)
                }
                _ => None,
            }
        };

        let mut fragment_index = index;
        match found {
            Some(LaggingRedundancy::TrailingRun(len)) => {
                if let Some(body) = selection_set.items[index].selection_set_mut() {
                    body.items.truncate(body.items.len() - len);
                }
                debug!(count = len, "removed selections repeated right after inline fragment");
                changed = true;
            }
            Some(LaggingRedundancy::First) => {
                if let Some(body) = selection_set.items[index].selection_set_mut() {
                    body.items.remove(0);
                }
                selection_set.items.swap(index, index + 1);
                fragment_index = index + 1;
                debug!("hoisted first selection of inline fragment in front of it");
                changed = true;
            }
            None => {}
        }

        let emptied = selection_set.items[fragment_index]
            .selection_set()
            .is_some_and(SelectionSet::is_empty);
        if emptied {
            selection_set.items.remove(fragment_index);
            index = fragment_index;
        } else {
            index = fragment_index + 1;
        }
    }

    changed
}

fn find_lagging_redundancy(
    body: &[Selection],
    following: &[Selection],
) -> Option<LaggingRedundancy> {
    let longest_run = (1..=body.len().min(following.len())).rev().find(|&len| {
        body[body.len() - len..]
            .iter()
            .zip(&following[..len])
            .all(|(a, b)| selections_equal(a, b))
    });
    if let Some(len) = longest_run {
        return Some(LaggingRedundancy::TrailingRun(len));
    }

    match (body.first(), following.first()) {
        (Some(first), Some(next)) if selections_equal(first, next) => {
            Some(LaggingRedundancy::First)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_query;
    use crate::printer::canonical_print;
    use crate::schema::SchemaIndex;

    const SDL: &str = r#"
        type Query {
          user(id: Int): User
          profile(id: Int): Profile
          search: SearchResult
          f: User
        }
        interface Profile { handle: String name: String friends: [Profile] }
        type User implements Profile {
          handle: String
          name: String
          birthday: String
          friends: [Profile]
        }
        type Page implements Profile { handle: String name: String friends: [Profile] }
        union SearchResult = User | Page
    "#;

    fn dedupe_with(source: &str, config: &NormalizerConfig) -> String {
        let schema = SchemaIndex::from_sdl(SDL).expect("schema to parse");
        let document = parse_query(source).expect("to parse");
        canonical_print(&deduplicate_selections(&document, &schema, config))
    }

    fn dedupe(source: &str) -> String {
        dedupe_with(source, &NormalizerConfig::default())
    }

    #[test]
    fn keeps_first_occurrence() {
        assert_eq!(
            dedupe("{ user(id: 4) { name birthday name } }"),
            "{user(id:4){name birthday}}"
        );
    }

    #[test]
    fn concatenates_nested_selections() {
        assert_eq!(dedupe("{ f { name } f { name birthday } }"), "{f{name birthday}}");
        assert_eq!(
            dedupe("{ f { friends { name } } f { friends { name handle } } }"),
            "{f{friends{name handle}}}"
        );
    }

    #[test]
    fn response_key_arguments_and_directives_must_match() {
        assert_eq!(
            dedupe("{ a: user(id: 1) { name } a: user(id: 1) { birthday } b: user(id: 2) { name } }"),
            "{a:user(id:1){name birthday}b:user(id:2){name}}"
        );
        assert_eq!(
            dedupe("{ f @a { name } f @b { name } }"),
            "{f@a{name}f@b{name}}"
        );
    }

    #[test]
    fn merges_inline_fragments() {
        assert_eq!(
            dedupe("{ ... @skip(if: $a) { f { name } } ... @skip(if: $a) { f { handle } } ... @skip(if: $b) { f { name } } }"),
            "{...@skip(if:$a){f{name handle}}...@skip(if:$b){f{name}}}"
        );
    }

    #[test]
    fn interface_leading_redundancy() {
        assert_eq!(
            dedupe("{ profile(id: 4) { handle ... on User { handle name } } }"),
            "{profile(id:4){handle ...on User{name}}}"
        );
    }

    #[test]
    fn leading_redundancy_needs_deep_equality() {
        assert_eq!(
            dedupe("{ profile { friends { name } ... on User { friends { handle } } } }"),
            "{profile{friends{name}...on User{friends{handle}}}}"
        );
        assert_eq!(
            dedupe("{ profile { friends { name } ... on User { friends { name } birthday } } }"),
            "{profile{friends{name}...on User{birthday}}}"
        );
    }

    #[test]
    fn leading_redundancy_only_looks_backwards() {
        assert_eq!(
            dedupe("{ profile { ... on User { handle name } handle } }"),
            "{profile{...on User{handle name}handle}}"
        );
    }

    #[test]
    fn fully_redundant_fragment_is_removed() {
        assert_eq!(
            dedupe("{ profile { handle name ... on User { name } } }"),
            "{profile{handle name}}"
        );
    }

    #[test]
    fn no_leading_redundancy_on_objects_or_unions() {
        assert_eq!(
            dedupe("{ user(id: 4) { handle ... on User { handle name } } }"),
            "{user(id:4){handle ...on User{handle name}}}"
        );
        assert_eq!(
            dedupe("{ search { __typename ... on User { __typename name } } }"),
            "{search{__typename ...on User{__typename name}}}"
        );
    }

    #[test]
    fn merge_and_redundancy_reach_a_fixed_point() {
        assert_eq!(
            dedupe("{ profile { handle ... on User { handle } ... on User { name } } }"),
            "{profile{handle ...on User{name}}}"
        );
        assert_eq!(
            dedupe("{ profile { ... on User { birthday } handle ... on User { handle } } }"),
            "{profile{...on User{birthday handle}handle}}"
        );
    }

    #[test]
    fn lagging_redundancy_is_opt_in() {
        let hoisting = NormalizerConfig {
            hoist_lagging_selections: true,
            ..NormalizerConfig::default()
        };

        assert_eq!(
            dedupe("{ profile { ... on User { name handle } handle } }"),
            "{profile{...on User{name handle}handle}}"
        );
        assert_eq!(
            dedupe_with("{ profile { ... on User { name handle } handle } }", &hoisting),
            "{profile{...on User{name}handle}}"
        );
        assert_eq!(
            dedupe_with("{ profile { ... on User { handle name } handle } }", &hoisting),
            "{profile{handle ...on User{name}}}"
        );
        assert_eq!(
            dedupe_with("{ profile { ... on User { name handle } name handle } }", &hoisting),
            "{profile{name handle}}"
        );
    }

    #[test]
    fn lagging_rules_do_not_apply_to_objects() {
        let hoisting = NormalizerConfig {
            hoist_lagging_selections: true,
            ..NormalizerConfig::default()
        };
        assert_eq!(
            dedupe_with("{ user { ... on User { name handle } handle } }", &hoisting),
            "{user{...on User{name handle}handle}}"
        );
    }

    #[test]
    fn selection_count_never_grows() {
        let schema = SchemaIndex::from_sdl(SDL).expect("schema to parse");
        let document = parse_query(
            "{ profile { handle ... on User { handle name } ... on User { name birthday } handle } }",
        )
        .expect("to parse");
        let deduplicated =
            deduplicate_selections(&document, &schema, &NormalizerConfig::default());

        let count = |document: &Document| {
            document
                .operations()
                .map(|op| op.selection_set.selection_count())
                .sum::<usize>()
        };
        assert!(count(&deduplicated) < count(&document));
        assert_eq!(
            canonical_print(&deduplicated),
            "{profile{handle ...on User{name birthday}}}"
        );
    }
}
