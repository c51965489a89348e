use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{directive::Arguments, directive::Directive, selection_item::Selection};
use crate::printer::print_node;
use crate::utils::pretty_display::{Indent, PrettyDisplay};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectionSet {
    pub items: Vec<Selection>,
}

impl SelectionSet {
    pub fn new(items: Vec<Selection>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of selections in this set and every nested set.
    pub fn selection_count(&self) -> usize {
        self.items.iter().map(Selection::selection_count).sum()
    }

    /// Nesting depth, a set of leaf fields is depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .items
            .iter()
            .map(|item| item.selection_set().map_or(0, SelectionSet::depth))
            .max()
            .unwrap_or(0)
    }
}

impl From<Vec<Selection>> for SelectionSet {
    fn from(items: Vec<Selection>) -> Self {
        Self { items }
    }
}

impl Display for SelectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_node(|printer| printer.write_selection_set(self)))
    }
}

impl PrettyDisplay for SelectionSet {
    fn pretty_fmt(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        writeln!(f, "{{")?;
        for item in &self.items {
            item.pretty_fmt(f, depth + 1)?;
        }
        write!(f, "{}}}", Indent(depth))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldSelection {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Arguments,
    pub directives: Vec<Directive>,
    pub selection_set: Option<SelectionSet>,
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            name: name.into(),
            arguments: vec![],
            directives: vec![],
            selection_set: None,
        }
    }

    /// The key this field is written under in the response.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.selection_set.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InlineFragmentSelection {
    pub type_condition: Option<String>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FragmentSpreadSelection {
    pub fragment_name: String,
    pub directives: Vec<Directive>,
}
