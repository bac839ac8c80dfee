//! Turns schema violations into one-line English sentences.
use std::fmt::Display;

use serde_json::Value;

use crate::schema::shared::{RESOURCE_LOCATION_PATTERN, RESOURCE_OR_TAG_PATTERN, TAG_REFERENCE_PATTERN};

/// The kind of JSON value a schema `type` keyword names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub(crate) fn from_name(name: &str) -> Option<Kind> {
        Some(match name {
            "null" => Kind::Null,
            "boolean" => Kind::Boolean,
            "integer" => Kind::Integer,
            "number" => Kind::Number,
            "string" => Kind::String,
            "array" => Kind::Array,
            "object" => Kind::Object,
            _ => return None,
        })
    }

    /// The most specific kind of a value. Numbers with no fractional part are
    /// integers, whatever their JSON spelling.
    pub(crate) fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(n) if is_integer(n) => Kind::Integer,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub(crate) fn accepts(self, value: &Value) -> bool {
        match self {
            Kind::Number => value.is_number(),
            kind => Kind::of(value) == kind,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

fn is_integer(n: &serde_json::Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
}

/// The value of a number the schemas would accept as an `integer`, so `5.0`
/// reads as 5.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) if is_integer(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// A single way a value failed its schema, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Violation {
    Required(String),
    Type { expected: Vec<Kind>, found: Kind },
    Enum { found: Value, allowed: Vec<Value> },
    Const(Value),
    Minimum { found: f64, limit: f64 },
    Maximum { found: f64, limit: f64 },
    MinItems(usize),
    MaxItems(usize),
    MinProperties { limit: usize, found: usize },
    MaxProperties { limit: usize, found: usize },
    Pattern { found: String, pattern: String },
    Additional(String),
    NoMatch,
    ManyMatch,
    /// Anything without a sentence of its own, already formatted.
    Other(String),
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Required(field) => write!(f, "Missing required field: {}", field),
            Violation::Type { expected, found } => {
                let names: Vec<_> = expected.iter().map(|k| k.name()).collect();
                write!(f, "Expected {}, got {}", names.join(" or "), found.name())
            }
            Violation::Enum { found, allowed } => {
                let allowed: Vec<_> = allowed.iter().map(plain).collect();
                write!(
                    f,
                    "Invalid value {}. Expected one of: {}",
                    quoted(found),
                    allowed.join(", ")
                )
            }
            Violation::Const(expected) => write!(f, "Expected value {}", quoted(expected)),
            Violation::Minimum { found, limit } => {
                write!(f, "Value {} is below minimum {}", number(*found), number(*limit))
            }
            Violation::Maximum { found, limit } => {
                write!(f, "Value {} is above maximum {}", number(*found), number(*limit))
            }
            Violation::MinItems(n) => write!(f, "Expected at least {} {}", n, plural(*n, "item")),
            Violation::MaxItems(n) => write!(f, "Expected at most {} {}", n, plural(*n, "item")),
            Violation::MinProperties { limit, found } => write!(
                f,
                "Expected at least {} {}, found {}",
                limit,
                plural(*limit, "property"),
                found
            ),
            Violation::MaxProperties { limit, found } => write!(
                f,
                "Expected at most {} {}, found {}",
                limit,
                plural(*limit, "property"),
                found
            ),
            Violation::Pattern { found, pattern } => match pattern.as_str() {
                RESOURCE_LOCATION_PATTERN => write!(f, "Invalid resource location: \"{}\"", found),
                TAG_REFERENCE_PATTERN => write!(f, "Invalid tag reference: \"{}\"", found),
                RESOURCE_OR_TAG_PATTERN => {
                    write!(f, "Invalid resource location or tag: \"{}\"", found)
                }
                _ => write!(f, "\"{}\" does not match the required format", found),
            },
            Violation::Additional(field) => write!(f, "Unexpected property: {}", field),
            Violation::NoMatch => f.write_str("Value does not match any allowed form"),
            Violation::ManyMatch => f.write_str("Value matches more than one allowed form"),
            Violation::Other(message) => f.write_str(message),
        }
    }
}

fn plural(n: usize, word: &str) -> String {
    match (n, word) {
        (1, _) => word.to_owned(),
        (_, "property") => "properties".to_owned(),
        _ => format!("{}s", word),
    }
}

// Whole numbers print without a trailing `.0`.
fn number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn quoted(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required() {
        assert_eq!(
            Violation::Required("effects".into()).to_string(),
            "Missing required field: effects"
        );
    }

    #[test]
    fn type_mismatch_lists_alternatives() {
        let v = Violation::Type {
            expected: vec![Kind::Object, Kind::Array],
            found: Kind::String,
        };
        assert_eq!(v.to_string(), "Expected object or array, got string");
    }

    #[test]
    fn enum_names_value_and_choices() {
        let v = Violation::Enum {
            found: json!("sideways"),
            allowed: vec![json!("rigid"), json!("terrain_matching")],
        };
        assert_eq!(
            v.to_string(),
            "Invalid value \"sideways\". Expected one of: rigid, terrain_matching"
        );
    }

    #[test]
    fn limits_print_whole_numbers() {
        let v = Violation::Maximum {
            found: 16777216.0,
            limit: 16777215.0,
        };
        assert_eq!(v.to_string(), "Value 16777216 is above maximum 16777215");

        let v = Violation::Minimum {
            found: -0.5,
            limit: 0.0,
        };
        assert_eq!(v.to_string(), "Value -0.5 is below minimum 0");
    }

    #[test]
    fn known_patterns_get_named() {
        let v = Violation::Pattern {
            found: "Bad Id".into(),
            pattern: RESOURCE_LOCATION_PATTERN.into(),
        };
        assert_eq!(v.to_string(), "Invalid resource location: \"Bad Id\"");
    }

    #[test]
    fn integers_by_value() {
        assert_eq!(Kind::of(&json!(3.0)), Kind::Integer);
        assert_eq!(Kind::of(&json!(3.5)), Kind::Number);
        assert!(Kind::Number.accepts(&json!(3)));
        assert!(!Kind::Integer.accepts(&json!(3.5)));
    }

    #[test]
    fn integer_values() {
        assert_eq!(as_integer(&json!(5)), Some(5));
        assert_eq!(as_integer(&json!(5.0)), Some(5));
        assert_eq!(as_integer(&json!(-2.0)), Some(-2));
        assert_eq!(as_integer(&json!(5.5)), None);
        assert_eq!(as_integer(&json!("5")), None);
    }
}
