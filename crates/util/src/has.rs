use crate::key::Key;
use crate::value::Value;

/// Own-property check, the equivalent of `key in value` for plain data.
///
/// Arrays own their indices below `len` and the `length` pseudo-property.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_draft_util::{has, Key, Value};
///
/// let obj = Value::from(json!({"foo": "bar"}));
/// assert!(has(&obj, &Key::from("foo")));
/// assert!(!has(&obj, &Key::from("baz")));
///
/// let arr = Value::from(json!([1, 2]));
/// assert!(has(&arr, &Key::from(1usize)));
/// assert!(has(&arr, &Key::from("length")));
/// ```
pub fn has(value: &Value, key: &Key) -> bool {
    match value {
        Value::Object(node) => node.items().contains_key(key.as_field().as_ref()),
        Value::Array(node) => {
            key.is_length() || key.as_index().is_some_and(|i| i < node.items().len())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_object() {
        let obj = Value::from(json!({"foo": "bar", "baz": 42, "0": true}));
        assert!(has(&obj, &Key::from("foo")));
        assert!(has(&obj, &Key::from(0usize)));
        assert!(!has(&obj, &Key::from("qux")));
    }

    #[test]
    fn test_has_array() {
        let arr = Value::from(json!([1, 2, 3]));
        assert!(has(&arr, &Key::from(2usize)));
        assert!(!has(&arr, &Key::from(3usize)));
        assert!(!has(&arr, &Key::from("foo")));
    }

    #[test]
    fn test_scalars_have_nothing() {
        assert!(!has(&Value::Null, &Key::from("foo")));
        assert!(!has(&Value::from("string"), &Key::from("length")));
    }
}
