use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::printer::print_node;

/// Literal or variable value as it appears in arguments and default values.
///
/// Numbers keep their source text: two values are the same number only when
/// they are spelled the same way.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Value {
    Variable(String),
    Int(String),
    Float(String),
    String(StringValue),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    /// Fields in source order
    Object(Vec<(String, Value)>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct StringValue {
    /// Decoded content, escapes already resolved
    pub value: String,
    /// Whether the string is meant to be written as a `"""` block string
    pub block: bool,
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            block: false,
        }
    }

    pub fn block(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            block: true,
        }
    }
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(StringValue::new(value))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Nesting depth of list and object values, a scalar is depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Value::List(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Value::Object(fields) => 1 + fields.iter().map(|(_, v)| v.depth()).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&print_node(|printer| printer.write_value(self)))
    }
}
