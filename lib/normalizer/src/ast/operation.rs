use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{directive::Directive, selection_set::SelectionSet, value::Value};
use crate::printer::print_node;
use crate::utils::pretty_display::{Indent, PrettyDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
}

impl OperationDefinition {
    /// An anonymous query with only a selection set, `{ ... }`.
    pub fn shorthand(selection_set: SelectionSet) -> Self {
        Self {
            kind: OperationKind::Query,
            name: None,
            variable_definitions: vec![],
            directives: vec![],
            selection_set,
        }
    }

    /// Whether the operation can be written as a bare selection set.
    pub fn is_shorthand(&self) -> bool {
        self.kind == OperationKind::Query
            && self.name.is_none()
            && self.variable_definitions.is_empty()
            && self.directives.is_empty()
    }
}

impl Display for OperationDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_node(|printer| printer.write_operation(self)))
    }
}

impl PrettyDisplay for OperationDefinition {
    fn pretty_fmt(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "{}", Indent(depth))?;
        if !self.is_shorthand() {
            write!(f, "{}", self.kind)?;
            if let Some(name) = &self.name {
                write!(f, " {name}")?;
            }
            if !self.variable_definitions.is_empty() {
                let printed = self
                    .variable_definitions
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "({printed})")?;
            }
            for directive in &self.directives {
                write!(f, " {directive}")?;
            }
            write!(f, " ")?;
        }
        self.selection_set.pretty_fmt(f, depth)?;
        writeln!(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VariableDefinition {
    pub name: String,
    pub var_type: TypeNode,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

impl Display for VariableDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_node(|printer| {
            printer.write_variable_definition(self)
        }))
    }
}

/// Type reference of a variable, `[User!]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TypeNode {
    Named(String),
    List(Box<TypeNode>),
    NonNull(Box<TypeNode>),
}

impl TypeNode {
    /// The named type with list and non-null wrappers removed.
    pub fn inner_type(&self) -> &str {
        match self {
            TypeNode::Named(name) => name,
            TypeNode::List(inner) | TypeNode::NonNull(inner) => inner.inner_type(),
        }
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeNode::Named(name) => write!(f, "{name}"),
            TypeNode::List(inner) => write!(f, "[{inner}]"),
            TypeNode::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}
