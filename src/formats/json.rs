//! Lenient accessors for script-exported JSON, where numbers sometimes
//! arrive as strings and vectors as arrays of any length.

use serde_json::Value;

pub(crate) fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => crate::foundation::time::parse_number(s),
        _ => None,
    }
}

/// Numeric components of an array value (non-numeric entries are skipped).
pub(crate) fn numbers(v: &Value) -> Option<Vec<f64>> {
    match v {
        Value::Array(items) => Some(items.iter().filter_map(number).collect()),
        _ => None,
    }
}

/// A value that is either a scalar or the first component of a vector.
pub(crate) fn scalar_or_first(v: &Value) -> Option<f64> {
    number(v).or_else(|| numbers(v).and_then(|n| n.first().copied()))
}

pub(crate) fn field_number(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(number)
}

pub(crate) fn field_str<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// A JSON array field, skipping anything that is not an array.
pub(crate) fn field_array<'a>(obj: &'a Value, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parse `content` as a JSON object root.
pub(crate) fn parse_object(content: &str) -> Result<Value, String> {
    let v: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    if !v.is_object() {
        return Err("top-level JSON value is not an object".to_string());
    }
    Ok(v)
}
