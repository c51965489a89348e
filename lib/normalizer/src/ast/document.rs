use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{fragment::FragmentDefinition, operation::OperationDefinition};
use crate::printer::canonical_print;
use crate::utils::pretty_display::PrettyDisplay;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

/// An executable document, definitions in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(fragment) => Some(fragment),
            Definition::Operation(_) => None,
        })
    }

    /// Deepest selection set nesting across all definitions.
    pub fn depth(&self) -> usize {
        self.definitions
            .iter()
            .map(|def| match def {
                Definition::Operation(op) => op.selection_set.depth(),
                Definition::Fragment(fragment) => fragment.selection_set.depth(),
            })
            .max()
            .unwrap_or(0)
    }

    /// Indented, human readable form. Not canonical.
    pub fn pretty(&self) -> String {
        PrettyDisplay::pretty(self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&canonical_print(self))
    }
}

impl PrettyDisplay for Document {
    fn pretty_fmt(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        for (index, definition) in self.definitions.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            match definition {
                Definition::Operation(op) => op.pretty_fmt(f, depth)?,
                Definition::Fragment(fragment) => fragment.pretty_fmt(f, depth)?,
            }
        }
        Ok(())
    }
}
