//! Type-system questions the pipeline asks while rewriting a document.

mod error;
mod schema_index;

pub use error::SchemaError;
pub use schema_index::SchemaIndex;

use serde::{Deserialize, Serialize};

use crate::ast::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

pub trait SchemaOracle {
    /// Root type name for the given operation kind, if the schema defines one.
    fn root_type(&self, kind: OperationKind) -> Option<&str>;

    /// Named output type of `parent_type.field_name`, list and non-null
    /// wrappers stripped.
    fn field_type(&self, parent_type: &str, field_name: &str) -> Option<&str>;

    fn type_kind(&self, type_name: &str) -> Option<TypeKind>;

    /// Object types implementing `interface`, directly or through other
    /// interfaces. Sorted, no duplicates.
    fn implementors(&self, interface: &str) -> Vec<&str>;

    fn union_members(&self, union: &str) -> Vec<&str>;

    /// Like `field_type`, but also answers the meta fields available on
    /// every composite type.
    fn output_type(&self, parent_type: &str, field_name: &str) -> Option<&str> {
        match field_name {
            "__typename" => Some("String"),
            "__schema" => Some("__Schema"),
            "__type" => Some("__Type"),
            _ => self.field_type(parent_type, field_name),
        }
    }

    fn is_interface(&self, type_name: &str) -> bool {
        self.type_kind(type_name) == Some(TypeKind::Interface)
    }

    fn is_union(&self, type_name: &str) -> bool {
        self.type_kind(type_name) == Some(TypeKind::Union)
    }

    fn is_object(&self, type_name: &str) -> bool {
        self.type_kind(type_name) == Some(TypeKind::Object)
    }
}
