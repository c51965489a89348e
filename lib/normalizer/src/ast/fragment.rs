use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{directive::Directive, selection_set::SelectionSet};
use crate::printer::print_node;
use crate::utils::pretty_display::{Indent, PrettyDisplay};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

impl Display for FragmentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_node(|printer| printer.write_fragment(self)))
    }
}

impl PrettyDisplay for FragmentDefinition {
    fn pretty_fmt(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(
            f,
            "{}fragment {} on {}",
            Indent(depth),
            self.name,
            self.type_condition
        )?;
        for directive in &self.directives {
            write!(f, " {directive}")?;
        }
        write!(f, " ")?;
        self.selection_set.pretty_fmt(f, depth)?;
        writeln!(f)
    }
}
