use std::collections::{BTreeSet, HashMap};

use graphql_parser::schema::{Definition, Field, Type, TypeDefinition, TypeExtension};
use tracing::instrument;

use super::{SchemaError, SchemaOracle, TypeKind};
use crate::ast::OperationKind;

/// Lookup tables over an SDL document: type kinds, output field types and
/// possible types of abstract types.
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    type_kinds: HashMap<String, TypeKind>,
    type_fields: HashMap<String, HashMap<String, String>>,
    /// Union members, and for interfaces the objects and interfaces that
    /// declare `implements`
    possible_types: HashMap<String, BTreeSet<String>>,
}

impl SchemaIndex {
    #[instrument(level = "trace", skip_all)]
    pub fn from_sdl(sdl: &str) -> Result<Self, SchemaError> {
        let document = graphql_parser::parse_schema::<String>(sdl)
            .map_err(|error| SchemaError::Parse(error.to_string()))?;

        let mut index = SchemaIndex::default();

        for definition in &document.definitions {
            match definition {
                Definition::SchemaDefinition(schema) => {
                    index.query_type = schema.query.clone();
                    index.mutation_type = schema.mutation.clone();
                    index.subscription_type = schema.subscription.clone();
                }
                Definition::TypeDefinition(TypeDefinition::Object(object_type)) => {
                    index.add_type(&object_type.name, TypeKind::Object);
                    index.add_fields(&object_type.name, &object_type.fields);
                    index.add_implements(&object_type.name, &object_type.implements_interfaces);
                }
                Definition::TypeDefinition(TypeDefinition::Interface(interface_type)) => {
                    index.add_type(&interface_type.name, TypeKind::Interface);
                    index.add_fields(&interface_type.name, &interface_type.fields);
                    index.add_implements(
                        &interface_type.name,
                        &interface_type.implements_interfaces,
                    );
                }
                Definition::TypeDefinition(TypeDefinition::Union(union_type)) => {
                    index.add_type(&union_type.name, TypeKind::Union);
                    index
                        .possible_types
                        .entry(union_type.name.clone())
                        .or_default()
                        .extend(union_type.types.iter().cloned());
                }
                Definition::TypeDefinition(TypeDefinition::Scalar(scalar_type)) => {
                    index.add_type(&scalar_type.name, TypeKind::Scalar);
                }
                Definition::TypeDefinition(TypeDefinition::Enum(enum_type)) => {
                    index.add_type(&enum_type.name, TypeKind::Enum);
                }
                Definition::TypeDefinition(TypeDefinition::InputObject(input_type)) => {
                    index.add_type(&input_type.name, TypeKind::InputObject);
                }
                Definition::TypeExtension(TypeExtension::Object(extension)) => {
                    index.add_fields(&extension.name, &extension.fields);
                    index.add_implements(&extension.name, &extension.implements_interfaces);
                }
                Definition::TypeExtension(TypeExtension::Interface(extension)) => {
                    index.add_fields(&extension.name, &extension.fields);
                }
                Definition::TypeExtension(TypeExtension::Union(extension)) => {
                    index
                        .possible_types
                        .entry(extension.name.clone())
                        .or_default()
                        .extend(extension.types.iter().cloned());
                }
                _ => {}
            }
        }

        // Without a schema definition the conventional root names apply
        let default_root = |index: &SchemaIndex, name: &str| {
            index
                .type_kinds
                .contains_key(name)
                .then(|| name.to_string())
        };
        if index.query_type.is_none() {
            index.query_type = default_root(&index, "Query");
        }
        if index.mutation_type.is_none() {
            index.mutation_type = default_root(&index, "Mutation");
        }
        if index.subscription_type.is_none() {
            index.subscription_type = default_root(&index, "Subscription");
        }

        Ok(index)
    }

    fn add_type(&mut self, name: &str, kind: TypeKind) {
        self.type_kinds.insert(name.to_string(), kind);
    }

    fn add_fields<'d>(&mut self, type_name: &str, fields: &[Field<'d, String>]) {
        let type_fields = self.type_fields.entry(type_name.to_string()).or_default();
        for field in fields {
            type_fields.insert(field.name.clone(), named_type(&field.field_type).to_string());
        }
    }

    fn add_implements(&mut self, type_name: &str, interfaces: &[String]) {
        for interface in interfaces {
            self.possible_types
                .entry(interface.clone())
                .or_default()
                .insert(type_name.to_string());
        }
    }
}

fn named_type<'a>(field_type: &'a Type<'_, String>) -> &'a str {
    match field_type {
        Type::NamedType(name) => name.as_str(),
        Type::ListType(inner) | Type::NonNullType(inner) => named_type(inner),
    }
}

impl SchemaOracle for SchemaIndex {
    fn root_type(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    fn field_type(&self, parent_type: &str, field_name: &str) -> Option<&str> {
        self.type_fields
            .get(parent_type)?
            .get(field_name)
            .map(String::as_str)
    }

    fn type_kind(&self, type_name: &str) -> Option<TypeKind> {
        self.type_kinds.get(type_name).copied()
    }

    fn implementors(&self, interface: &str) -> Vec<&str> {
        let mut objects = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut pending = vec![interface];

        while let Some(current) = pending.pop() {
            let Some(possible) = self.possible_types.get(current) else {
                continue;
            };
            for possible_type in possible {
                if !visited.insert(possible_type.as_str()) {
                    continue;
                }
                match self.type_kind(possible_type) {
                    Some(TypeKind::Interface) => pending.push(possible_type.as_str()),
                    _ => {
                        objects.insert(possible_type.as_str());
                    }
                }
            }
        }

        objects.into_iter().collect()
    }

    fn union_members(&self, union: &str) -> Vec<&str> {
        if !self.is_union(union) {
            return vec![];
        }
        self.possible_types
            .get(union)
            .map(|members| members.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
