use crate::ast::{
    Definition, Directive, Document, FragmentDefinition, OperationDefinition, Selection,
    SelectionSet, StringValue, TypeNode, Value, VariableDefinition,
};
use crate::parser::SourceToken;

use super::escape::{write_block_string, write_quoted};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastToken {
    None,
    Punctuator,
    Lexical,
}

/// Writes tokens into a single buffer, deciding spacing from the previous
/// token only.
pub(crate) struct CanonicalPrinter {
    buffer: String,
    last: LastToken,
}

impl CanonicalPrinter {
    pub(crate) fn new() -> Self {
        Self {
            // most operations fit within 1KB
            buffer: String::with_capacity(1024),
            last: LastToken::None,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }

    /// Names, numbers and keyword literals.
    #[inline]
    fn write_lexical(&mut self, s: &str) {
        if self.last == LastToken::Lexical {
            self.buffer.push(' ');
        }
        self.buffer.push_str(s);
        self.last = LastToken::Lexical;
    }

    #[inline]
    fn write_punctuator(&mut self, s: &str) {
        self.buffer.push_str(s);
        self.last = LastToken::Punctuator;
    }

    #[inline]
    fn write_punctuator_char(&mut self, c: char) {
        self.buffer.push(c);
        self.last = LastToken::Punctuator;
    }

    /// `...` is the only punctuator that takes a space after a lexical token.
    #[inline]
    fn write_spread(&mut self) {
        if self.last == LastToken::Lexical {
            self.buffer.push(' ');
        }
        self.write_punctuator("...");
    }

    pub(crate) fn write_string(&mut self, value: &StringValue) {
        if self.last == LastToken::Lexical {
            self.buffer.push(' ');
        }
        if value.block {
            write_block_string(&mut self.buffer, &value.value);
        } else {
            write_quoted(&mut self.buffer, &value.value);
        }
        self.last = LastToken::Lexical;
    }

    pub(crate) fn write_source_token(&mut self, token: SourceToken<'_>) {
        match token {
            SourceToken::Punctuator("...") => self.write_spread(),
            SourceToken::Punctuator(punctuator) => self.write_punctuator(punctuator),
            SourceToken::Lexical(lexical) => self.write_lexical(lexical),
            SourceToken::String(value) => self.write_string(&value),
        }
    }

    pub(crate) fn write_document(&mut self, document: &Document) {
        for definition in &document.definitions {
            match definition {
                Definition::Operation(op) => self.write_operation(op),
                Definition::Fragment(fragment) => self.write_fragment(fragment),
            }
        }
    }

    pub(crate) fn write_operation(&mut self, op: &OperationDefinition) {
        if !op.is_shorthand() {
            self.write_lexical(op.kind.as_str());
            if let Some(name) = &op.name {
                self.write_lexical(name);
            }
            if !op.variable_definitions.is_empty() {
                self.write_punctuator_char('(');
                for variable in &op.variable_definitions {
                    self.write_variable_definition(variable);
                }
                self.write_punctuator_char(')');
            }
            self.write_directives(&op.directives);
        }
        self.write_selection_set(&op.selection_set);
    }

    pub(crate) fn write_fragment(&mut self, fragment: &FragmentDefinition) {
        self.write_lexical("fragment");
        self.write_lexical(&fragment.name);
        self.write_lexical("on");
        self.write_lexical(&fragment.type_condition);
        self.write_directives(&fragment.directives);
        self.write_selection_set(&fragment.selection_set);
    }

    pub(crate) fn write_variable_definition(&mut self, variable: &VariableDefinition) {
        self.write_punctuator_char('$');
        self.write_lexical(&variable.name);
        self.write_punctuator_char(':');
        self.write_type(&variable.var_type);
        if let Some(default_value) = &variable.default_value {
            self.write_punctuator_char('=');
            self.write_value(default_value);
        }
        self.write_directives(&variable.directives);
    }

    fn write_type(&mut self, ty: &TypeNode) {
        match ty {
            TypeNode::Named(name) => self.write_lexical(name),
            TypeNode::List(inner) => {
                self.write_punctuator_char('[');
                self.write_type(inner);
                self.write_punctuator_char(']');
            }
            TypeNode::NonNull(inner) => {
                self.write_type(inner);
                self.write_punctuator_char('!');
            }
        }
    }

    pub(crate) fn write_directives(&mut self, directives: &[Directive]) {
        for directive in directives {
            self.write_punctuator_char('@');
            self.write_lexical(&directive.name);
            self.write_arguments(&directive.arguments);
        }
    }

    fn write_arguments(&mut self, arguments: &[(String, Value)]) {
        if arguments.is_empty() {
            return;
        }
        self.write_punctuator_char('(');
        for (name, value) in arguments {
            self.write_lexical(name);
            self.write_punctuator_char(':');
            self.write_value(value);
        }
        self.write_punctuator_char(')');
    }

    pub(crate) fn write_selection_set(&mut self, set: &SelectionSet) {
        self.write_punctuator_char('{');
        for item in &set.items {
            self.write_selection(item);
        }
        self.write_punctuator_char('}');
    }

    pub(crate) fn write_selection(&mut self, selection: &Selection) {
        match selection {
            Selection::Field(field) => {
                if let Some(alias) = &field.alias {
                    self.write_lexical(alias);
                    self.write_punctuator_char(':');
                }
                self.write_lexical(&field.name);
                self.write_arguments(&field.arguments);
                self.write_directives(&field.directives);
                if let Some(selection_set) = &field.selection_set {
                    self.write_selection_set(selection_set);
                }
            }
            Selection::FragmentSpread(spread) => {
                self.write_spread();
                self.write_lexical(&spread.fragment_name);
                self.write_directives(&spread.directives);
            }
            Selection::InlineFragment(fragment) => {
                self.write_spread();
                if let Some(type_condition) = &fragment.type_condition {
                    self.write_lexical("on");
                    self.write_lexical(type_condition);
                }
                self.write_directives(&fragment.directives);
                self.write_selection_set(&fragment.selection_set);
            }
        }
    }

    pub(crate) fn write_value(&mut self, value: &Value) {
        match value {
            Value::Variable(name) => {
                self.write_punctuator_char('$');
                self.write_lexical(name);
            }
            Value::Int(literal) | Value::Float(literal) => self.write_lexical(literal),
            Value::String(s) => self.write_string(s),
            Value::Boolean(b) => self.write_lexical(if *b { "true" } else { "false" }),
            Value::Null => self.write_lexical("null"),
            Value::Enum(name) => self.write_lexical(name),
            Value::List(items) => {
                self.write_punctuator_char('[');
                for item in items {
                    self.write_value(item);
                }
                self.write_punctuator_char(']');
            }
            Value::Object(fields) => {
                self.write_punctuator_char('{');
                for (name, value) in fields {
                    self.write_lexical(name);
                    self.write_punctuator_char(':');
                    self.write_value(value);
                }
                self.write_punctuator_char('}');
            }
        }
    }
}
