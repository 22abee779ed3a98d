#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::HashMap, fmt::Display};

use serde::Serialize;
use tabled::Tabled;

use crate::error::TokenizeError;

/// The data types a binding can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// 64-bit signed integer, written `Integer`
    Integer,
    /// 64-bit float, written `Real`
    Real,
    /// text, written `String`
    String,
}

impl DataType {
    /// All supported data types, in declaration order.
    pub const ALL: [DataType; 3] = [DataType::Integer, DataType::Real, DataType::String];

    /// Name of the type as it appears in source code.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Integer => "Integer",
            DataType::Real => "Real",
            DataType::String => "String",
        }
    }

    /// Looks up a data type by its source name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Returns true if `literal` is a well-formed literal of this type.
    pub fn is_valid(self, literal: &str) -> bool {
        match self {
            DataType::Integer => literal.parse::<i64>().is_ok(),
            DataType::Real => literal.parse::<f64>().is_ok(),
            DataType::String => is_string_literal(literal),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Checks that `literal` is wrapped in double quotes and that every interior
/// quote is escaped.
fn is_string_literal(literal: &str) -> bool {
    let Some(inner) = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };

    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                // a dangling backslash would escape the closing quote
                if chars.next().is_none() {
                    return false;
                }
            }
            '"' => return false,
            _ => {}
        }
    }
    true
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// an `Integer` value
    Integer(i64),
    /// a `Real` value
    Real(f64),
    /// a `String` value
    String(String),
}

impl Value {
    /// The data type this value belongs to.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Integer(_) => DataType::Integer,
            Value::Real(_) => DataType::Real,
            Value::String(_) => DataType::String,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => {
                let text = r.to_string();
                if r.is_finite() && !text.contains('.') {
                    write!(f, "{text}.0")
                } else {
                    f.write_str(&text)
                }
            }
            Value::String(s) => f.write_str(s),
        }
    }
}

/// Converts a source literal into a [`Value`] of the requested type.
///
/// * `data_type`: the declared type of the binding
/// * `literal`: the literal text, already trimmed
pub fn tokenize(data_type: DataType, literal: &str) -> Result<Value, TokenizeError> {
    match data_type {
        DataType::Integer => literal
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| TokenizeError::IllegalInteger(literal.to_string())),
        DataType::Real => literal
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| TokenizeError::IllegalReal(literal.to_string())),
        DataType::String => unescape_literal(literal).map(Value::String),
    }
}

/// Strips the quotes off a string literal and resolves its escape sequences.
pub fn unescape_literal(literal: &str) -> Result<String, TokenizeError> {
    if !DataType::String.is_valid(literal) {
        return Err(TokenizeError::IllegalString(literal.to_string()));
    }
    snailquote::unescape(literal).map_err(|_| TokenizeError::IllegalString(literal.to_string()))
}

/// A declared constant or variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    /// name of the binding
    pub name:      String,
    /// declared type
    pub data_type: DataType,
    /// current value, `None` until something is assigned
    pub value:     Option<Value>,
    /// constants are declared in the `Constants` section and never change
    pub constant:  bool,
}

impl Binding {
    /// Creates a variable binding.
    pub fn variable(name: impl Into<String>, data_type: DataType, value: Option<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            value,
            constant: false,
        }
    }

    /// Creates a constant binding.
    pub fn constant(name: impl Into<String>, value: Value) -> Self {
        Self {
            name:      name.into(),
            data_type: value.data_type(),
            value:     Some(value),
            constant:  true,
        }
    }
}

/// A row of the bindings table printed by `algo check`.
#[derive(Tabled)]
pub struct BindingRow {
    #[tabled(rename = "Name")]
    /// binding name
    name:  String,
    #[tabled(rename = "Kind")]
    /// `constant` or `variable`
    kind:  &'static str,
    #[tabled(rename = "Type")]
    /// declared data type
    ty:    DataType,
    #[tabled(rename = "Value")]
    /// current value, or a placeholder when unassigned
    value: String,
}

impl From<&Binding> for BindingRow {
    fn from(binding: &Binding) -> Self {
        Self {
            name:  binding.name.clone(),
            kind:  if binding.constant { "constant" } else { "variable" },
            ty:    binding.data_type,
            value: binding
                .value
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_else(|| "no value assigned".to_string()),
        }
    }
}

/// Ordered symbol table of constants and variables.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Bindings {
    /// bindings in declaration order
    entries: Vec<Binding>,
    /// name -> position in `entries`
    #[serde(skip)]
    index:   HashMap<String, usize>,
}

impl Bindings {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding. Returns false, leaving the table untouched, if the name
    /// is already taken.
    pub fn declare(&mut self, binding: Binding) -> bool {
        if self.index.contains_key(&binding.name) {
            return false;
        }
        self.index.insert(binding.name.clone(), self.entries.len());
        self.entries.push(binding);
        true
    }

    /// Looks up a binding by name.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Returns true if a binding with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the current value of `name`, if it is declared and assigned.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(|b| b.value.as_ref())
    }

    /// Overwrites the value of an existing binding. Returns false if the name
    /// is unknown.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        match self.index.get(name) {
            Some(&i) => {
                self.entries[i].value = Some(value);
                true
            }
            None => false,
        }
    }

    /// Iterates over all bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    /// Iterates over constants only.
    pub fn constants(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter().filter(|b| b.constant)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_literal_requires_escaped_interior_quotes() {
        assert!(DataType::String.is_valid(r#""say \"hi\"""#));
        assert!(!DataType::String.is_valid(r#""a"b""#));
        assert!(!DataType::String.is_valid("\"unterminated"));
        assert!(!DataType::String.is_valid(r#""trailing\""#));
        assert!(!DataType::String.is_valid("\""));
        assert!(DataType::String.is_valid("\"\""));
    }

    #[test]
    fn real_display_keeps_fraction() {
        assert_eq!(Value::Real(3.0).to_string(), "3.0");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::Real(1e16).to_string(), "10000000000000000.0");
        assert_eq!(Value::Real(1e-7).to_string(), "0.0000001");
        assert_eq!(Value::Real(-4.0).to_string(), "-4.0");
    }

    #[test]
    fn declare_rejects_duplicates() {
        let mut bindings = Bindings::new();
        assert!(bindings.declare(Binding::variable("x", DataType::Integer, None)));
        assert!(!bindings.declare(Binding::constant("x", Value::Integer(1))));
        assert_eq!(bindings.len(), 1);
        assert!(!bindings.get("x").expect("x declared").constant);
    }
}
