use std::collections::HashMap;

use tracing::{instrument, trace};

use crate::ast::{
    Definition, Document, FragmentDefinition, InlineFragmentSelection, Selection, SelectionSet,
};
use crate::normalization::config::NormalizerConfig;
use crate::normalization::error::NormalizationError;

/// Replaces every fragment spread with an inline fragment holding the
/// fragment's selections, then drops all fragment definitions.
///
/// The inline fragment takes the type condition of the definition and the
/// directives of the spread. Expansion deeper than `max_depth` fails, which
/// also catches fragments that spread themselves. Expansion to more than
/// `max_selections` selections fails as well, so fragments spread several
/// times at every level cannot grow the document exponentially.
#[instrument(level = "trace", skip_all)]
pub fn inline_fragment_spreads(
    document: &Document,
    config: &NormalizerConfig,
) -> Result<Document, NormalizationError> {
    let mut fragment_map: HashMap<&str, &FragmentDefinition> = HashMap::new();
    for fragment in document.fragments() {
        fragment_map.entry(fragment.name.as_str()).or_insert(fragment);
    }

    let mut inliner = Inliner {
        fragment_map,
        max_depth: config.max_depth,
        max_selections: config.max_selections,
        selections: 0,
    };

    let mut definitions = Vec::with_capacity(document.definitions.len());
    for definition in &document.definitions {
        if let Definition::Operation(op) = definition {
            let mut op = op.clone();
            inliner.handle_selection_set(&mut op.selection_set, 1)?;
            definitions.push(Definition::Operation(op));
        }
    }

    trace!(selections = inliner.selections, "inlined fragment spreads");
    Ok(Document::new(definitions))
}

struct Inliner<'d> {
    fragment_map: HashMap<&'d str, &'d FragmentDefinition>,
    max_depth: usize,
    max_selections: usize,
    /// Selections of the expanded operations visited so far.
    selections: usize,
}

impl Inliner<'_> {
    fn handle_selection_set(
        &mut self,
        selection_set: &mut SelectionSet,
        depth: usize,
    ) -> Result<(), NormalizationError> {
        if depth > self.max_depth {
            return Err(NormalizationError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }

        for selection in &mut selection_set.items {
            self.selections += 1;
            if self.selections > self.max_selections {
                return Err(NormalizationError::SelectionLimitExceeded {
                    limit: self.max_selections,
                });
            }

            if let Selection::FragmentSpread(spread) = selection {
                let fragment = self
                    .fragment_map
                    .get(spread.fragment_name.as_str())
                    .copied()
                    .ok_or_else(|| NormalizationError::UndefinedFragment {
                        fragment_name: spread.fragment_name.clone(),
                    })?;

                trace!(fragment = %fragment.name, "inlining fragment spread");

                *selection = Selection::InlineFragment(InlineFragmentSelection {
                    type_condition: Some(fragment.type_condition.clone()),
                    directives: std::mem::take(&mut spread.directives),
                    selection_set: fragment.selection_set.clone(),
                });
            }

            if let Some(nested) = selection.selection_set_mut() {
                self.handle_selection_set(nested, depth + 1)?;
            }
        }

        Ok(())
    }
}
