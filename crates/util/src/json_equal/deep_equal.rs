use crate::value::Value;

/// Performs a deep equality check between two values.
///
/// Containers are compared element by element; object key order is not
/// significant. Identical nodes short-circuit. Numbers use `==`, so `NaN`
/// is never structurally equal to anything.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_draft_util::{deep_equal, Value};
///
/// let a = Value::from(json!({"foo": [1, 2, 3]}));
/// let b = Value::from(json!({"foo": [1, 2, 3]}));
/// let c = Value::from(json!({"foo": [1, 2, 4]}));
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            let (arr_a, arr_b) = (arr_a.items(), arr_b.items());
            if arr_a.len() != arr_b.len() {
                return false;
            }
            arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            let (obj_a, obj_b) = (obj_a.items(), obj_b.items());
            if obj_a.len() != obj_b.len() {
                return false;
            }
            for (key, val_a) in obj_a {
                match obj_b.get(key) {
                    Some(val_b) => {
                        if !deep_equal(val_a, val_b) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }

        // Different types are never equal
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(j: serde_json::Value) -> Value {
        Value::from(j)
    }

    #[test]
    fn test_scalars() {
        assert!(deep_equal(&v(json!(1)), &v(json!(1))));
        assert!(!deep_equal(&v(json!(1)), &v(json!(2))));
        assert!(!deep_equal(&v(json!(0)), &v(json!(null))));
        assert!(!deep_equal(&v(json!("")), &v(json!(null))));
        assert!(!deep_equal(&v(json!(1)), &v(json!(true))));
    }

    #[test]
    fn test_nan_not_structurally_equal() {
        assert!(!deep_equal(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
    }

    #[test]
    fn test_equal_objects_different_order() {
        assert!(deep_equal(
            &v(json!({"a": 1, "b": "2"})),
            &v(json!({"b": "2", "a": 1}))
        ));
    }

    #[test]
    fn test_not_equal_objects_extra_property() {
        assert!(!deep_equal(
            &v(json!({"a": 1, "b": "2"})),
            &v(json!({"a": 1, "b": "2", "c": []}))
        ));
    }

    #[test]
    fn test_not_equal_objects_different_properties() {
        assert!(!deep_equal(
            &v(json!({"a": 1, "b": "2", "c": 3})),
            &v(json!({"a": 1, "b": "2", "d": 3}))
        ));
    }

    #[test]
    fn test_arrays() {
        assert!(deep_equal(&v(json!([1, 2, 3])), &v(json!([1, 2, 3]))));
        assert!(!deep_equal(&v(json!([1, 2, 3])), &v(json!([1, 2]))));
        assert!(!deep_equal(&v(json!({})), &v(json!([]))));
    }

    #[test]
    fn test_nested() {
        assert!(deep_equal(
            &v(json!({"a": [{"b": "c"}]})),
            &v(json!({"a": [{"b": "c"}]}))
        ));
        assert!(!deep_equal(
            &v(json!([{"a": "a"}, {"b": "b"}])),
            &v(json!([{"a": "a"}, {"b": "c"}]))
        ));
    }
}
