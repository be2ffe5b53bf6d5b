//! Type coercion of resolved values into declared target kinds
//!
//! Each [`TargetType`] has one total conversion over the JSON value space.
//! Conversions follow loose JavaScript-style semantics: stringification
//! joins arrays with commas, numeric conversion of non-numeric input yields
//! the JSON-representable NaN equivalent `null`, and truthiness follows the
//! usual falsy set.
//!
//! Map-like non-array inputs are a special case kept for compatibility
//! with existing mapping documents: the container passes through unchanged
//! while its children are still coerced, so a child failure (a JSON parse
//! error under the `object` target) propagates even though successful child
//! results are discarded.
//!
//! Copyright (c) 2025 Remap Team
//! Licensed under the MIT OR Apache-2.0 license

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::TargetType;

/// Errors raised while coercing a value
#[derive(Error, Debug)]
pub enum CoercionError {
    /// The `object` target parses string input as JSON text
    #[error("invalid JSON text: {source}")]
    JsonParse {
        #[from]
        source: serde_json::Error,
    },
}

/// Coerce `value` to the declared `target` kind
///
/// Never fails except for the `object`/JSON-parse case; callers treat the
/// failure as recoverable, keeping the value as it was before the attempt.
pub fn coerce(value: &Value, target: TargetType) -> Result<Value, CoercionError> {
    if let Value::Object(map) = value {
        // compatibility passthrough: children are coerced for effect only
        for child in map.values() {
            coerce(child, target)?;
        }
        return Ok(value.clone());
    }

    match target {
        TargetType::String => Ok(Value::String(stringify(value))),
        TargetType::Number => Ok(to_number(value)),
        TargetType::Null => Ok(Value::Null),
        TargetType::Boolean => Ok(Value::Bool(to_boolean(value))),
        TargetType::Array => Ok(to_array(value)),
        TargetType::Object => to_object(value),
    }
}

/// Loose stringification: `null` is empty, arrays join element-wise with
/// `,`, structured elements render as JSON text
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // render whole floats without the trailing fraction
        Some(f) if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

/// Loose numeric conversion; non-numeric input becomes `null` (JSON has no
/// NaN, and `null` is the value serde_json itself produces for non-finite
/// floats)
fn to_number(value: &Value) -> Value {
    match value {
        Value::Null => Value::from(0),
        Value::Bool(b) => Value::from(if *b { 1 } else { 0 }),
        Value::Number(_) => value.clone(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Value::from(0);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Value::from(i);
            }
            match trimmed.parse::<f64>() {
                Ok(f) => serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                Err(_) => Value::Null,
            }
        }
        Value::Array(items) => match items.len() {
            0 => Value::from(0),
            1 => to_number(&items[0]),
            _ => Value::Null,
        },
        Value::Object(_) => Value::Null,
    }
}

fn to_boolean(value: &Value) -> bool {
    match value {
        Value::String(s) => s == "true",
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(b) => *b,
        Value::Null => false,
    }
}

fn to_array(value: &Value) -> Value {
    match value {
        Value::Array(_) => value.clone(),
        // entries-as-pairs, Object.entries semantics
        Value::Object(map) => Value::Array(
            map.iter()
                .map(|(key, child)| Value::Array(vec![Value::String(key.clone()), child.clone()]))
                .collect(),
        ),
        Value::Null => Value::Array(Vec::new()),
        _ => Value::Array(vec![value.clone()]),
    }
}

fn to_object(value: &Value) -> Result<Value, CoercionError> {
    match value {
        Value::Object(_) => Ok(value.clone()),
        Value::String(s) => Ok(serde_json::from_str(s)?),
        Value::Number(n) => {
            let mut map = Map::new();
            map.insert(number_to_string(n), value.clone());
            Ok(Value::Object(map))
        }
        Value::Array(items) => {
            let mut map = Map::new();
            for (i, item) in items.iter().enumerate() {
                map.insert(i.to_string(), item.clone());
            }
            Ok(Value::Object(map))
        }
        Value::Null => Ok(Value::Object(Map::new())),
        // booleans have no object form and pass through
        Value::Bool(_) => Ok(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce(&json!(5), TargetType::String).unwrap(), json!("5"));
        assert_eq!(coerce(&json!(1.5), TargetType::String).unwrap(), json!("1.5"));
        assert_eq!(coerce(&json!(true), TargetType::String).unwrap(), json!("true"));
        assert_eq!(coerce(&json!(null), TargetType::String).unwrap(), json!(""));
        assert_eq!(
            coerce(&json!([1, [2, 3], "x"]), TargetType::String).unwrap(),
            json!("1,2,3,x")
        );
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce(&json!("5"), TargetType::Number).unwrap(), json!(5));
        assert_eq!(coerce(&json!("2.5"), TargetType::Number).unwrap(), json!(2.5));
        assert_eq!(coerce(&json!(" 7 "), TargetType::Number).unwrap(), json!(7));
        assert_eq!(coerce(&json!(""), TargetType::Number).unwrap(), json!(0));
        assert_eq!(coerce(&json!(null), TargetType::Number).unwrap(), json!(0));
        assert_eq!(coerce(&json!(true), TargetType::Number).unwrap(), json!(1));
        // non-numeric input yields the NaN equivalent
        assert_eq!(coerce(&json!("abc"), TargetType::Number).unwrap(), json!(null));
        assert_eq!(coerce(&json!([1, 2]), TargetType::Number).unwrap(), json!(null));
        assert_eq!(coerce(&json!(["8"]), TargetType::Number).unwrap(), json!(8));
    }

    #[test]
    fn test_coerce_null() {
        assert_eq!(coerce(&json!("anything"), TargetType::Null).unwrap(), json!(null));
        assert_eq!(coerce(&json!([1]), TargetType::Null).unwrap(), json!(null));
    }

    #[test]
    fn test_coerce_boolean() {
        assert_eq!(coerce(&json!("true"), TargetType::Boolean).unwrap(), json!(true));
        assert_eq!(coerce(&json!("yes"), TargetType::Boolean).unwrap(), json!(false));
        assert_eq!(coerce(&json!(1), TargetType::Boolean).unwrap(), json!(true));
        assert_eq!(coerce(&json!(0), TargetType::Boolean).unwrap(), json!(false));
        assert_eq!(coerce(&json!(2), TargetType::Boolean).unwrap(), json!(false));
        assert_eq!(coerce(&json!(null), TargetType::Boolean).unwrap(), json!(false));
        assert_eq!(coerce(&json!([]), TargetType::Boolean).unwrap(), json!(false));
        assert_eq!(coerce(&json!([0]), TargetType::Boolean).unwrap(), json!(true));
    }

    #[test]
    fn test_coerce_array() {
        assert_eq!(coerce(&json!(null), TargetType::Array).unwrap(), json!([]));
        assert_eq!(coerce(&json!([1, 2]), TargetType::Array).unwrap(), json!([1, 2]));
        assert_eq!(coerce(&json!("x"), TargetType::Array).unwrap(), json!(["x"]));
        assert_eq!(coerce(&json!(5), TargetType::Array).unwrap(), json!([5]));
    }

    #[test]
    fn test_entries_as_pairs_choice() {
        // the documented Object.entries semantics for the array target,
        // reachable through the standalone conversion
        assert_eq!(
            to_array(&json!({"a": 1, "b": 2})),
            json!([["a", 1], ["b", 2]])
        );
    }

    #[test]
    fn test_coerce_object() {
        assert_eq!(coerce(&json!(5), TargetType::Object).unwrap(), json!({"5": 5}));
        assert_eq!(coerce(&json!(null), TargetType::Object).unwrap(), json!({}));
        assert_eq!(
            coerce(&json!(["a", "b"]), TargetType::Object).unwrap(),
            json!({"0": "a", "1": "b"})
        );
        assert_eq!(
            coerce(&json!("{\"k\": 1}"), TargetType::Object).unwrap(),
            json!({"k": 1})
        );
    }

    #[test]
    fn test_coerce_object_parse_failure() {
        let err = coerce(&json!("not json"), TargetType::Object).unwrap_err();
        assert!(matches!(err, CoercionError::JsonParse { .. }));
    }

    #[test]
    fn test_coerce_object_passthrough_keeps_container() {
        // map-like input passes through unchanged regardless of target
        let value = json!({"n": "5", "nested": {"m": "6"}});
        assert_eq!(coerce(&value, TargetType::Number).unwrap(), value);
        assert_eq!(coerce(&value, TargetType::String).unwrap(), value);
    }

    #[test]
    fn test_coerce_object_passthrough_propagates_child_error() {
        // a child JSON-parse failure still surfaces
        let value = json!({"child": "not json"});
        assert!(coerce(&value, TargetType::Object).is_err());
    }
}
