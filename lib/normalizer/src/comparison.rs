//! The two structural relations the deduplicator is built on.
//!
//! *Equivalence* is shallow: two selections would write the same response
//! key under the same conditions, whatever they select below. *Equality*
//! is equivalence applied recursively, comparing nested selection sets
//! position by position.
//!
//! Arguments and object fields are compared as sets keyed by name.
//! Directive lists and list values are compared in order.

use crate::ast::{Directive, Selection, SelectionSet, Value};

pub fn values_equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Variable(a), Value::Variable(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::String(a), Value::String(b)) => a.value == b.value,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Enum(a), Value::Enum(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equivalent(a, b))
        }
        (Value::Object(a), Value::Object(b)) => unordered_pairs_equivalent(a, b),
        _ => false,
    }
}

pub fn arguments_equivalent(a: &[(String, Value)], b: &[(String, Value)]) -> bool {
    unordered_pairs_equivalent(a, b)
}

/// Same directives in the same order, arguments of each compared as sets.
pub fn directives_equivalent(a: &[Directive], b: &[Directive]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(a, b)| {
            a.name == b.name && arguments_equivalent(&a.arguments, &b.arguments)
        })
}

pub fn selections_equivalent(a: &Selection, b: &Selection) -> bool {
    match (a, b) {
        (Selection::Field(a), Selection::Field(b)) => {
            a.response_key() == b.response_key()
                && arguments_equivalent(&a.arguments, &b.arguments)
                && directives_equivalent(&a.directives, &b.directives)
        }
        (Selection::InlineFragment(a), Selection::InlineFragment(b)) => {
            a.type_condition == b.type_condition
                && directives_equivalent(&a.directives, &b.directives)
        }
        (Selection::FragmentSpread(a), Selection::FragmentSpread(b)) => {
            a.fragment_name == b.fragment_name
                && directives_equivalent(&a.directives, &b.directives)
        }
        _ => false,
    }
}

pub fn selections_equal(a: &Selection, b: &Selection) -> bool {
    if !selections_equivalent(a, b) {
        return false;
    }

    match (a.selection_set(), b.selection_set()) {
        (Some(a), Some(b)) => selection_sets_equal(a, b),
        (None, None) => true,
        _ => false,
    }
}

pub fn selection_sets_equal(a: &SelectionSet, b: &SelectionSet) -> bool {
    a.items.len() == b.items.len()
        && a.items
            .iter()
            .zip(&b.items)
            .all(|(a, b)| selections_equal(a, b))
}

/// Names are unique on both sides, so equal length plus a match for every
/// name of `a` means the two sets are the same.
fn unordered_pairs_equivalent(a: &[(String, Value)], b: &[(String, Value)]) -> bool {
    a.len() == b.len()
        && a.iter().all(|(name, value)| {
            b.iter()
                .find(|(other_name, _)| other_name == name)
                .is_some_and(|(_, other_value)| values_equivalent(value, other_value))
        })
}
