//! Value inspection helpers.
//!
//! Documents are plain `serde_json::Value` trees. Tags only ask a handful of
//! questions of them: is this a primitive, what is its string form, what kind
//! of value is it (for error messages).

use serde_json::Value;

/// Strings, numbers and booleans are primitives; null, arrays and objects are not.
pub fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// The string form of a primitive: strings as-is, numbers in their JSON
/// rendering, booleans as `true`/`false`. `None` for non-primitives.
pub fn primitive_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The JSON type name of a value, used in `got` fields of errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
