//! Reusable field filters
//!
//! These filters transform field values before validation

use anyhow::Result;
use serde_json::Value;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Ok(Value::String(s.trim().to_string())),
        other => Ok(other),
    }
}

/// Filter: convert string to uppercase
pub fn uppercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) => Ok(Value::String(s.to_uppercase())),
        other => Ok(other),
    }
}

/// Filter: turn an empty string into null so `required()` and optional
/// fields treat it as absent
pub fn empty_as_null() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::String(s) if s.is_empty() => Ok(Value::Null),
        other => Ok(other),
    }
}

/// Filter: parse numeric strings (as sent by HTML selects) into integers
pub fn coerce_integer() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| match value {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| anyhow::anyhow!("'{}' must be a whole number", field)),
        other => Ok(other),
    }
}
