use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::directive::Directive;
use super::selection_set::{
    FieldSelection, FragmentSpreadSelection, InlineFragmentSelection, SelectionSet,
};
use crate::printer::print_node;
use crate::utils::pretty_display::{Indent, PrettyDisplay};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum Selection {
    Field(FieldSelection),
    InlineFragment(InlineFragmentSelection),
    FragmentSpread(FragmentSpreadSelection),
}

impl Selection {
    pub fn selection_set(&self) -> Option<&SelectionSet> {
        match self {
            Selection::Field(field) => field.selection_set.as_ref(),
            Selection::InlineFragment(fragment) => Some(&fragment.selection_set),
            Selection::FragmentSpread(_) => None,
        }
    }

    pub fn selection_set_mut(&mut self) -> Option<&mut SelectionSet> {
        match self {
            Selection::Field(field) => field.selection_set.as_mut(),
            Selection::InlineFragment(fragment) => Some(&mut fragment.selection_set),
            Selection::FragmentSpread(_) => None,
        }
    }

    pub fn into_selection_set(self) -> Option<SelectionSet> {
        match self {
            Selection::Field(field) => field.selection_set,
            Selection::InlineFragment(fragment) => Some(fragment.selection_set),
            Selection::FragmentSpread(_) => None,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::InlineFragment(fragment) => &fragment.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
        }
    }

    /// This selection plus everything nested below it.
    pub fn selection_count(&self) -> usize {
        1 + self.selection_set().map_or(0, SelectionSet::selection_count)
    }
}

impl From<FieldSelection> for Selection {
    fn from(field: FieldSelection) -> Self {
        Selection::Field(field)
    }
}

impl From<InlineFragmentSelection> for Selection {
    fn from(fragment: InlineFragmentSelection) -> Self {
        Selection::InlineFragment(fragment)
    }
}

impl From<FragmentSpreadSelection> for Selection {
    fn from(spread: FragmentSpreadSelection) -> Self {
        Selection::FragmentSpread(spread)
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_node(|printer| printer.write_selection(self)))
    }
}

impl PrettyDisplay for Selection {
    fn pretty_fmt(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        let indent = Indent(depth);
        match self {
            Selection::Field(field) => {
                write!(f, "{indent}")?;
                if let Some(alias) = &field.alias {
                    write!(f, "{alias}: ")?;
                }
                write!(f, "{}", field.name)?;
                write_arguments_and_directives(f, &field.arguments, &field.directives)?;
                if let Some(selection_set) = &field.selection_set {
                    write!(f, " ")?;
                    selection_set.pretty_fmt(f, depth)?;
                }
                writeln!(f)
            }
            Selection::InlineFragment(fragment) => {
                write!(f, "{indent}...")?;
                if let Some(type_condition) = &fragment.type_condition {
                    write!(f, " on {type_condition}")?;
                }
                write_arguments_and_directives(f, &[], &fragment.directives)?;
                write!(f, " ")?;
                fragment.selection_set.pretty_fmt(f, depth)?;
                writeln!(f)
            }
            Selection::FragmentSpread(spread) => {
                write!(f, "{indent}...{}", spread.fragment_name)?;
                write_arguments_and_directives(f, &[], &spread.directives)?;
                writeln!(f)
            }
        }
    }
}

fn write_arguments_and_directives(
    f: &mut std::fmt::Formatter<'_>,
    arguments: &[(String, super::value::Value)],
    directives: &[Directive],
) -> std::fmt::Result {
    if !arguments.is_empty() {
        let printed = arguments
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({printed})")?;
    }
    for directive in directives {
        write!(f, " {directive}")?;
    }
    Ok(())
}
