//! JSON <-> Cordon Value conversion utilities

use crate::Value;

/// Convert serde_json::Value to Cordon Value
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::Array(arr.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

/// Convert Cordon Value to serde_json::Value.
///
/// JSON has no `undefined` or non-finite numbers; those become `null`.
/// Integral numbers are written without a fractional part.
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Undefined | Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
            serde_json::Value::Number((n as i64).into())
        }
        Value::Number(n) => serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_numbers_become_doubles() {
        assert_eq!(json_to_value(json!(3)), Value::Number(3.0));
        assert_eq!(json_to_value(json!(2.5)), Value::Number(2.5));
    }

    #[test]
    fn test_undefined_and_nan_become_null() {
        assert_eq!(value_to_json(Value::Undefined), json!(null));
        assert_eq!(value_to_json(Value::Number(f64::NAN)), json!(null));
        assert_eq!(value_to_json(Value::Number(4.0)), json!(4));
        assert_eq!(value_to_json(Value::Number(-0.5)), json!(-0.5));
    }
}
