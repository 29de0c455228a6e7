//! GraphQL literal values.
//!
//! Introspection reports default values as GraphQL literal text
//! (`"10"`, `"\"abc\""`, `"[RED, GREEN]"`, `"{limit: 5}"`). The text is
//! parsed with `async-graphql-parser` and mapped into [`Value`].

use async_graphql_parser::types as ast;
use async_graphql_value::ConstValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ValueParseError;

/// A constant GraphQL input value.
///
/// Numbers are stored in their printed form, so `1.50` and `1.5` compare equal
/// while `1` and `1.0` do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Null,
    Int(String),
    Float(String),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

/// The syntactic kind of a literal, used to detect type-changing defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Int,
    Float,
    String,
    Boolean,
    Enum,
    List,
    Object,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Enum(_) => ValueKind::Enum,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Parses a constant GraphQL literal. Variables are rejected.
    pub fn parse(input: &str) -> Result<Value, ValueParseError> {
        parse_literal(input)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "NullValue",
            ValueKind::Int => "IntValue",
            ValueKind::Float => "FloatValue",
            ValueKind::String => "StringValue",
            ValueKind::Boolean => "BooleanValue",
            ValueKind::Enum => "EnumValue",
            ValueKind::List => "ArrayValue",
            ValueKind::Object => "ObjectValue",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(text) | Value::Float(text) | Value::Enum(text) => f.write_str(text),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\r' => f.write_str("\\r")?,
                        '\t' => f.write_str("\\t")?,
                        c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Parses `input` as the default value of a one-field input object, so the
/// GraphQL parser handles lexing, escapes and block strings.
fn parse_literal(input: &str) -> Result<Value, ValueParseError> {
    let error = |reason: &str| ValueParseError {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let source = format!("input Literal {{ value: Int = {input}\n}}");
    let document = async_graphql_parser::parse_schema(&source).map_err(|e| error(&e.to_string()))?;

    let [ast::TypeSystemDefinition::Type(definition)] = document.definitions.as_slice() else {
        return Err(error("unexpected trailing input"));
    };
    let ast::TypeKind::InputObject(input_object) = &definition.node.kind else {
        return Err(error("unexpected trailing input"));
    };
    let [field] = input_object.fields.as_slice() else {
        return Err(error("unexpected trailing input"));
    };
    if !field.node.directives.is_empty() {
        return Err(error("directives are not allowed in constant values"));
    }
    let literal = field
        .node
        .default_value
        .as_ref()
        .ok_or_else(|| error("expected a value"))?;

    from_const(&literal.node).map_err(error)
}

fn from_const(value: &ConstValue) -> Result<Value, &'static str> {
    Ok(match value {
        ConstValue::Null => Value::Null,
        ConstValue::Number(number) if number.is_f64() => Value::Float(number.to_string()),
        ConstValue::Number(number) => Value::Int(number.to_string()),
        ConstValue::String(s) => Value::String(s.clone()),
        ConstValue::Boolean(b) => Value::Boolean(*b),
        ConstValue::Enum(name) => Value::Enum(name.as_str().to_owned()),
        ConstValue::Binary(_) => return Err("binary values have no literal form"),
        ConstValue::List(items) => Value::List(items.iter().map(from_const).collect::<Result<_, _>>()?),
        ConstValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, value)| from_const(value).map(|value| (name.as_str().to_owned(), value)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(Value::parse("10").unwrap(), Value::Int("10".into()));
        assert_eq!(Value::parse("-1.5").unwrap(), Value::Float("-1.5".into()));
        assert_eq!(Value::parse("true").unwrap(), Value::Boolean(true));
        assert_eq!(Value::parse("null").unwrap(), Value::Null);
        assert_eq!(Value::parse("RED").unwrap(), Value::Enum("RED".into()));
        assert_eq!(
            Value::parse(r#""a\"bA""#).unwrap(),
            Value::String("a\"bA".into())
        );
    }

    #[test]
    fn test_parse_compound() {
        let value = Value::parse(r#"{limit: 5, tags: ["x" "y"], order: ASC}"#).unwrap();
        let Value::Object(fields) = &value else {
            panic!("expected object, got {value:?}");
        };
        assert_eq!(fields["limit"], Value::Int("5".into()));
        assert_eq!(
            fields["tags"],
            Value::List(vec![Value::String("x".into()), Value::String("y".into())])
        );
        assert_eq!(value.to_string(), r#"{limit: 5, order: ASC, tags: ["x", "y"]}"#);
    }

    #[test]
    fn test_object_equality_ignores_field_order() {
        assert_eq!(
            Value::parse("{a: 1, b: 2}").unwrap(),
            Value::parse("{b: 2, a: 1}").unwrap()
        );
    }

    #[test]
    fn test_block_string() {
        let value = Value::parse("\"\"\"\n    hello\n      world\n\"\"\"").unwrap();
        assert_eq!(value, Value::String("hello\n  world".into()));

        let crlf = Value::parse("\"\"\"\r\n    hello\r\n      world\r\n\"\"\"").unwrap();
        assert_eq!(crlf, value, "CRLF line endings should not add blank lines");
    }

    #[test]
    fn test_number_equality_follows_value() {
        assert_eq!(Value::parse("1.50").unwrap(), Value::parse("1.5").unwrap());
        assert_ne!(Value::parse("1").unwrap(), Value::parse("1.0").unwrap());
    }


    #[test]
    fn test_reject_invalid_literals() {
        assert!(Value::parse("$var").is_err());
        assert!(Value::parse("").is_err());
        assert!(Value::parse("[1, 2").is_err());
        assert!(Value::parse("\"open").is_err());
        assert!(Value::parse("1 2").is_err());
        assert!(Value::parse("1 } input Other { x: Int = 2").is_err());
        assert!(Value::parse("1 @skip").is_err());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Value::parse("1").unwrap().kind(), ValueKind::Int);
        assert_eq!(Value::parse("1.0").unwrap().kind(), ValueKind::Float);
        assert_ne!(
            Value::parse("1").unwrap().kind(),
            Value::parse("\"1\"").unwrap().kind()
        );
    }
}
