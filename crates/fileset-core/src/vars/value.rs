use serde::Serialize;
use serde_json::Value;

/// A resolved variable value.
///
/// Only strings and sequences take part in template expansion; every other
/// shape is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VarValue {
    String(String),
    /// Elements that were strings have been expanded; others are as declared
    Sequence(Vec<Value>),
    /// Numbers, booleans, mappings and null
    Opaque(Value),
}

impl VarValue {
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Sequence(items) => Value::Array(items.clone()),
            Self::Opaque(value) => value.clone(),
        }
    }
}

impl From<Value> for VarValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items),
            other => Self::Opaque(other),
        }
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}
