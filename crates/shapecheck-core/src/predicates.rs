//! Built-in predicates.
//!
//! `is_equal` is what the compiler wraps around every plain schema leaf.
//! The rest cover presence and type checks that come up in nearly every
//! schema. Richer predicate libraries plug in through `shapecheck_contracts::is`.

use serde_json::Value;

use shapecheck_contracts::predicate::{is, IsDef, ValueResult};

/// Deep equality against `expected`. Absence fails.
pub fn is_equal(expected: Value) -> IsDef {
    is("equals", move |_, actual| match actual {
        None => ValueResult::key_missing(),
        Some(actual) if *actual == expected => ValueResult::valid(),
        Some(actual) => ValueResult::invalid(format!("expected {expected}, got {actual}")),
    })
}

/// Passes for any value, as long as the path exists.
pub fn is_any() -> IsDef {
    is("any", |_, actual| match actual {
        Some(_) => ValueResult::valid(),
        None => ValueResult::key_missing(),
    })
}

/// Passes only when the path does not exist.
pub fn key_missing() -> IsDef {
    is("key missing", |_, actual| match actual {
        None => ValueResult::valid(),
        Some(actual) => ValueResult::invalid(format!("expected this key to be absent, got {actual}")),
    })
}

/// JSON type names accepted by `is_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Bool => "bool",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

/// Passes when the value exists and has the given JSON type.
pub fn is_type(expected: JsonType) -> IsDef {
    is(format!("is {}", expected.as_str()), move |_, actual| match actual {
        None => ValueResult::key_missing(),
        Some(actual) if JsonType::of(actual) == expected => ValueResult::valid(),
        Some(actual) => ValueResult::invalid(format!(
            "expected a {}, got a {}",
            expected.as_str(),
            JsonType::of(actual).as_str()
        )),
    })
}
