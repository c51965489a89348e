use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::value::Value;
use crate::printer::print_node;

/// Ordered `name: value` pairs, names are unique in a valid document.
pub type Arguments = Vec<(String, Value)>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Directive {
    pub name: String,
    pub arguments: Arguments,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: vec![],
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.push((name.into(), value));
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        find_argument(&self.arguments, name)
    }
}

pub fn find_argument<'a>(arguments: &'a [(String, Value)], name: &str) -> Option<&'a Value> {
    arguments
        .iter()
        .find_map(|(arg_name, value)| (arg_name == name).then_some(value))
}

impl Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_node(|printer| {
            printer.write_directives(std::slice::from_ref(self))
        }))
    }
}
