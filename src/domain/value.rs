//! Recursive merge, clone, and dedup over structured values.
//!
//! The value model is [`serde_json::Value`]: a closed set of primitive,
//! sequence, and mapping shapes that the recursive walks pattern-match on
//! instead of inspecting runtime types. Cyclic input cannot be constructed
//! with this model, so the no-cycles precondition holds by construction.

use serde_json::{Map, Value};

/// Error raised when [`deep_clone`] is given a non-structural value.
///
/// This is the one loud failure in the module; every other operation
/// degrades to an empty value on bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneError {
    /// The argument is a primitive, not a sequence or mapping.
    NotAnObject,
}

impl std::fmt::Display for CloneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloneError::NotAnObject => {
                write!(f, "deep clone requires a sequence or mapping argument")
            }
        }
    }
}

impl std::error::Error for CloneError {}

/// Recursively merge `source` into `target`, source winning.
///
/// - A non-mapping `target` is replaced with an empty mapping first.
/// - A sequence `source` discards the target entirely and yields a copy of
///   the sequence; sequences are never merged element-wise.
/// - Otherwise every key of `source` is merged in: sequence and mapping
///   values recurse into whatever the target currently holds under that key
///   (possibly nothing), primitives simply overwrite.
///
/// # Example
/// ```
/// use admin_utils::object_merge;
/// use serde_json::json;
///
/// let merged = object_merge(json!({"a": {"b": 1, "c": 2}}), &json!({"a": {"b": 5}}));
/// assert_eq!(merged, json!({"a": {"b": 5, "c": 2}}));
/// ```
pub fn object_merge(target: Value, source: &Value) -> Value {
    if let Value::Array(items) = source {
        return Value::Array(items.clone());
    }
    let mut merged = match target {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(entries) = source {
        for (key, value) in entries {
            if value.is_object() || value.is_array() {
                let current = merged.remove(key).unwrap_or(Value::Null);
                merged.insert(key.clone(), object_merge(current, value));
            } else {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(merged)
}

/// Produce a structurally equal, independent copy of a sequence or mapping.
///
/// Primitives fail with [`CloneError::NotAnObject`] rather than cloning
/// silently. The walk recurses into truthy structural values and copies
/// everything else; only enumerable data survives, so this is not a
/// round-trip-safe clone for exotic value kinds.
///
/// # Errors
/// [`CloneError::NotAnObject`] when `source` is not a sequence or mapping.
pub fn deep_clone(source: &Value) -> Result<Value, CloneError> {
    match source {
        Value::Array(items) => Ok(Value::Array(items.iter().map(clone_entry).collect())),
        Value::Object(map) => Ok(Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), clone_entry(value)))
                .collect(),
        )),
        _ => Err(CloneError::NotAnObject),
    }
}

/// New sequence with each distinct element of `values` exactly once.
///
/// Structural equality, first-seen order preserved.
pub fn unique(values: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Drop falsy elements (`null`, `false`, `0`, `""`) from a sequence.
pub fn compact(values: Vec<Value>) -> Vec<Value> {
    values.into_iter().filter(is_truthy).collect()
}

/// JavaScript-style truthiness for a structured value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn clone_entry(value: &Value) -> Value {
    if is_truthy(value) && (value.is_object() || value.is_array()) {
        deep_clone(value).unwrap_or_else(|_| value.clone())
    } else {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_scalar_replaced_by_mapping() {
        let merged = object_merge(json!({"a": 1}), &json!({"a": {"b": 2}}));
        assert_eq!(merged, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_merge_preserves_sibling_keys() {
        let merged = object_merge(json!({"a": {"b": 1, "c": 2}}), &json!({"a": {"b": 5}}));
        assert_eq!(merged, json!({"a": {"b": 5, "c": 2}}));
    }

    #[test]
    fn test_merge_sequence_source_discards_target() {
        let merged = object_merge(json!({"x": 1}), &json!([1, 2, 3]));
        assert_eq!(merged, json!([1, 2, 3]));
    }

    #[test]
    fn test_merge_nested_sequence_replaces() {
        let merged = object_merge(json!({"a": {"list": [1]}}), &json!({"a": {"list": [2, 3]}}));
        assert_eq!(merged, json!({"a": {"list": [2, 3]}}));
    }

    #[test]
    fn test_merge_non_mapping_target_reset() {
        let merged = object_merge(json!(42), &json!({"a": 1}));
        assert_eq!(merged, json!({"a": 1}));
    }

    #[test]
    fn test_merge_primitive_overwrites() {
        let merged = object_merge(json!({"a": {"b": 1}}), &json!({"a": 7}));
        assert_eq!(merged, json!({"a": 7}));
    }

    #[test]
    fn test_deep_clone_independence() {
        let original = json!({"list": [{"n": 1}, {"n": 2}], "meta": {"deep": {"v": true}}});
        let mut clone = deep_clone(&original).expect("clones");
        assert_eq!(clone, original);

        clone["list"][0]["n"] = json!(99);
        clone["meta"]["deep"]["v"] = json!(false);
        assert_eq!(original["list"][0]["n"], json!(1));
        assert_eq!(original["meta"]["deep"]["v"], json!(true));
    }

    #[test]
    fn test_deep_clone_rejects_primitives() {
        assert_eq!(deep_clone(&json!(0)), Err(CloneError::NotAnObject));
        assert_eq!(deep_clone(&json!(null)), Err(CloneError::NotAnObject));
        assert_eq!(deep_clone(&json!("s")), Err(CloneError::NotAnObject));
        assert_eq!(deep_clone(&json!(false)), Err(CloneError::NotAnObject));
    }

    #[test]
    fn test_unique_preserves_first_seen_order() {
        let values = vec![json!(1), json!(1), json!(2), json!(3), json!(3)];
        assert_eq!(unique(&values), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_unique_structural_equality() {
        let values = vec![json!({"a": 1}), json!({"a": 1}), json!({"a": 2})];
        assert_eq!(unique(&values), vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_compact_drops_falsy() {
        let values = vec![
            json!(0),
            json!(1),
            json!(""),
            json!("x"),
            json!(null),
            json!(false),
            json!([]),
        ];
        assert_eq!(compact(values), vec![json!(1), json!("x"), json!([])]);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(-1)));
    }
}
