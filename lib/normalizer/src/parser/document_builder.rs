use apollo_parser::cst::{self, CstNode};

use crate::ast::{
    Arguments, Definition, Directive, Document, FieldSelection, FragmentDefinition,
    FragmentSpreadSelection, InlineFragmentSelection, OperationDefinition, OperationKind,
    Selection, SelectionSet, StringValue, TypeNode, Value, VariableDefinition,
};

use super::error::ParseError;
use super::syntax::{significant_text, start_offset};

/// Nesting limit shared by selection sets, list and object values and
/// type references.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Bound on the parser's own recursion, per level of document nesting. The
/// syntax tree nests a few nodes per level, so the exact depth is checked
/// while building the document.
const RECURSION_PER_LEVEL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Lexical tokens the parser may read, as `apollo-parser` counts them.
    pub max_tokens: Option<usize>,
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_tokens: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

pub fn parse_query(source: &str) -> Result<Document, ParseError> {
    parse_query_with_limit(source, ParseLimits::default())
}

pub fn parse_query_with_limit(source: &str, limits: ParseLimits) -> Result<Document, ParseError> {
    let mut parser = apollo_parser::Parser::new(source)
        .recursion_limit(limits.max_depth.saturating_mul(RECURSION_PER_LEVEL));
    if let Some(max_tokens) = limits.max_tokens {
        parser = parser.token_limit(max_tokens);
    }

    let tree = parser.parse();
    let recursion_limit = tree.recursion_limit();
    tracing::trace!(?recursion_limit, "recursion limit data");
    if let Some(error) = ParseError::from_syntax_errors(source, tree.errors()) {
        return Err(error);
    }

    DocumentBuilder {
        source,
        depth: 0,
        max_depth: limits.max_depth,
    }
    .build(&tree.document())
}

/// Turns the syntax tree into a [`Document`], checking what the grammar
/// alone lets through: nesting depth, variables in constant positions and
/// type system definitions.
struct DocumentBuilder<'s> {
    source: &'s str,
    depth: usize,
    max_depth: usize,
}

impl DocumentBuilder<'_> {
    fn error_at(&self, node: &impl CstNode, message: impl Into<String>) -> ParseError {
        ParseError::at_offset(message, self.source, start_offset(node))
    }

    fn required<T>(&self, part: Option<T>, parent: &impl CstNode, what: &str) -> Result<T, ParseError> {
        part.ok_or_else(|| self.error_at(parent, format!("Expected {what}")))
    }

    fn name(&self, name: Option<cst::Name>, parent: &impl CstNode) -> Result<String, ParseError> {
        Ok(self.required(name, parent, "a name")?.text().to_string())
    }

    fn enter(&mut self, node: &impl CstNode) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error_at(
                node,
                format!("Nesting depth limit of {} exceeded", self.max_depth),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn build(mut self, document: &cst::Document) -> Result<Document, ParseError> {
        let mut definitions = vec![];
        for definition in document.definitions() {
            let built = match definition {
                cst::Definition::OperationDefinition(operation) => {
                    Definition::Operation(self.operation(&operation)?)
                }
                cst::Definition::FragmentDefinition(fragment) => {
                    Definition::Fragment(self.fragment(&fragment)?)
                }
                other => {
                    return Err(self.error_at(
                        &other,
                        "Type system definitions are not supported in executable documents",
                    ))
                }
            };
            definitions.push(built);
        }

        if definitions.is_empty() {
            return Err(ParseError::at_offset(
                "Document must contain at least one definition",
                self.source,
                self.source.len(),
            ));
        }

        Ok(Document::new(definitions))
    }

    fn operation(
        &mut self,
        operation: &cst::OperationDefinition,
    ) -> Result<OperationDefinition, ParseError> {
        let kind = match operation.operation_type() {
            None => OperationKind::Query,
            Some(operation_type) => match significant_text(&operation_type).as_str() {
                "query" => OperationKind::Query,
                "mutation" => OperationKind::Mutation,
                "subscription" => OperationKind::Subscription,
                other => {
                    return Err(self.error_at(
                        &operation_type,
                        format!("Unknown operation type \"{other}\""),
                    ))
                }
            },
        };

        let name = operation.name().map(|name| name.text().to_string());
        let mut variable_definitions = vec![];
        if let Some(definitions) = operation.variable_definitions() {
            for definition in definitions.variable_definitions() {
                variable_definitions.push(self.variable_definition(&definition)?);
            }
        }
        let directives = self.directives(operation.directives(), false)?;
        let selection_set = self.required(operation.selection_set(), operation, "a selection set")?;
        let selection_set = self.selection_set(&selection_set)?;

        Ok(OperationDefinition {
            kind,
            name,
            variable_definitions,
            directives,
            selection_set,
        })
    }

    fn variable_definition(
        &mut self,
        definition: &cst::VariableDefinition,
    ) -> Result<VariableDefinition, ParseError> {
        let variable = self.required(definition.variable(), definition, "a variable")?;
        let name = self.name(variable.name(), &variable)?;
        let ty = self.required(definition.ty(), definition, "a type")?;
        let var_type = self.type_node(&ty)?;
        let default_value = match definition.default_value() {
            Some(default_value) => {
                let value = self.required(default_value.value(), &default_value, "a value")?;
                Some(self.value(&value, true)?)
            }
            None => None,
        };
        let directives = self.directives(definition.directives(), true)?;

        Ok(VariableDefinition {
            name,
            var_type,
            default_value,
            directives,
        })
    }

    fn type_node(&mut self, ty: &cst::Type) -> Result<TypeNode, ParseError> {
        match ty {
            cst::Type::NamedType(named) => Ok(TypeNode::Named(self.name(named.name(), named)?)),
            cst::Type::ListType(list) => self.list_type(list),
            cst::Type::NonNullType(non_null) => {
                let inner = match non_null.named_type() {
                    Some(named) => TypeNode::Named(self.name(named.name(), &named)?),
                    None => {
                        let list = self.required(non_null.list_type(), non_null, "a type")?;
                        self.list_type(&list)?
                    }
                };
                Ok(TypeNode::NonNull(Box::new(inner)))
            }
        }
    }

    fn list_type(&mut self, list: &cst::ListType) -> Result<TypeNode, ParseError> {
        self.enter(list)?;
        let item = self.required(list.ty(), list, "a type")?;
        let item = self.type_node(&item)?;
        self.leave();
        Ok(TypeNode::List(Box::new(item)))
    }

    fn type_condition(&self, condition: &cst::TypeCondition) -> Result<String, ParseError> {
        let named = self.required(condition.named_type(), condition, "a type name")?;
        self.name(named.name(), &named)
    }

    fn fragment(
        &mut self,
        fragment: &cst::FragmentDefinition,
    ) -> Result<FragmentDefinition, ParseError> {
        let fragment_name = self.required(fragment.fragment_name(), fragment, "a fragment name")?;
        let name = self.name(fragment_name.name(), &fragment_name)?;
        let type_condition = self.required(fragment.type_condition(), fragment, "a type condition")?;
        let type_condition = self.type_condition(&type_condition)?;
        let directives = self.directives(fragment.directives(), false)?;
        let selection_set = self.required(fragment.selection_set(), fragment, "a selection set")?;
        let selection_set = self.selection_set(&selection_set)?;

        Ok(FragmentDefinition {
            name,
            type_condition,
            directives,
            selection_set,
        })
    }

    fn selection_set(&mut self, selection_set: &cst::SelectionSet) -> Result<SelectionSet, ParseError> {
        self.enter(selection_set)?;
        let mut items = vec![];
        for selection in selection_set.selections() {
            items.push(self.selection(&selection)?);
        }
        self.leave();

        if items.is_empty() {
            return Err(self.error_at(selection_set, "Expected at least one selection"));
        }
        Ok(SelectionSet::new(items))
    }

    fn selection(&mut self, selection: &cst::Selection) -> Result<Selection, ParseError> {
        match selection {
            cst::Selection::Field(field) => self.field(field).map(Selection::Field),
            cst::Selection::FragmentSpread(spread) => {
                let fragment_name =
                    self.required(spread.fragment_name(), spread, "a fragment name")?;
                Ok(Selection::FragmentSpread(FragmentSpreadSelection {
                    fragment_name: self.name(fragment_name.name(), &fragment_name)?,
                    directives: self.directives(spread.directives(), false)?,
                }))
            }
            cst::Selection::InlineFragment(fragment) => {
                let type_condition = match fragment.type_condition() {
                    Some(condition) => Some(self.type_condition(&condition)?),
                    None => None,
                };
                let directives = self.directives(fragment.directives(), false)?;
                let selection_set =
                    self.required(fragment.selection_set(), fragment, "a selection set")?;

                Ok(Selection::InlineFragment(InlineFragmentSelection {
                    type_condition,
                    directives,
                    selection_set: self.selection_set(&selection_set)?,
                }))
            }
        }
    }

    fn field(&mut self, field: &cst::Field) -> Result<FieldSelection, ParseError> {
        let alias = match field.alias() {
            Some(alias) => Some(self.name(alias.name(), &alias)?),
            None => None,
        };
        let name = self.name(field.name(), field)?;
        let arguments = self.arguments(field.arguments(), false)?;
        let directives = self.directives(field.directives(), false)?;
        let selection_set = match field.selection_set() {
            Some(selection_set) => Some(self.selection_set(&selection_set)?),
            None => None,
        };

        Ok(FieldSelection {
            alias,
            name,
            arguments,
            directives,
            selection_set,
        })
    }

    fn arguments(
        &mut self,
        arguments: Option<cst::Arguments>,
        constant: bool,
    ) -> Result<Arguments, ParseError> {
        let Some(arguments) = arguments else {
            return Ok(vec![]);
        };

        let mut built = vec![];
        for argument in arguments.arguments() {
            let name = self.name(argument.name(), &argument)?;
            let value = self.required(argument.value(), &argument, "a value")?;
            built.push((name, self.value(&value, constant)?));
        }
        Ok(built)
    }

    fn directives(
        &mut self,
        directives: Option<cst::Directives>,
        constant: bool,
    ) -> Result<Vec<Directive>, ParseError> {
        let Some(directives) = directives else {
            return Ok(vec![]);
        };

        let mut built = vec![];
        for directive in directives.directives() {
            built.push(Directive {
                name: self.name(directive.name(), &directive)?,
                arguments: self.arguments(directive.arguments(), constant)?,
            });
        }
        Ok(built)
    }

    fn value(&mut self, value: &cst::Value, constant: bool) -> Result<Value, ParseError> {
        self.enter(value)?;

        let built = match value {
            cst::Value::Variable(variable) => {
                if constant {
                    return Err(self.error_at(variable, "Unexpected variable in constant value"));
                }
                Value::Variable(self.name(variable.name(), variable)?)
            }
            cst::Value::StringValue(string) => {
                let block = significant_text(string).starts_with(r#"""""#);
                Value::String(StringValue {
                    value: String::from(string.clone()),
                    block,
                })
            }
            cst::Value::FloatValue(float) => Value::Float(significant_text(float)),
            cst::Value::IntValue(int) => Value::Int(significant_text(int)),
            cst::Value::BooleanValue(boolean) => Value::Boolean(significant_text(boolean) == "true"),
            cst::Value::NullValue(_) => Value::Null,
            cst::Value::EnumValue(enum_value) => Value::Enum(self.name(enum_value.name(), enum_value)?),
            cst::Value::ListValue(list) => {
                let mut items = vec![];
                for item in list.values() {
                    items.push(self.value(&item, constant)?);
                }
                Value::List(items)
            }
            cst::Value::ObjectValue(object) => {
                let mut fields = vec![];
                for field in object.object_fields() {
                    let name = self.name(field.name(), &field)?;
                    let value = self.required(field.value(), &field, "a value")?;
                    fields.push((name, self.value(&value, constant)?));
                }
                Value::Object(fields)
            }
        };

        self.leave();
        Ok(built)
    }
}
