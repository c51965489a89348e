pub mod directive;
pub mod document;
pub mod fragment;
pub mod operation;
pub mod selection_item;
pub mod selection_set;
pub mod value;

pub use directive::{find_argument, Arguments, Directive};
pub use document::{Definition, Document};
pub use fragment::FragmentDefinition;
pub use operation::{OperationDefinition, OperationKind, TypeNode, VariableDefinition};
pub use selection_item::Selection;
pub use selection_set::{
    FieldSelection, FragmentSpreadSelection, InlineFragmentSelection, SelectionSet,
};
pub use value::{StringValue, Value};
