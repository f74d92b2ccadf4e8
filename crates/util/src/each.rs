use crate::key::Key;
use crate::value::Value;

/// Calls `f` for every own entry of an array or object, in order.
/// Scalars have no entries.
pub fn each<F>(value: &Value, mut f: F)
where
    F: FnMut(Key, &Value),
{
    match value {
        Value::Array(node) => {
            for (i, item) in node.items().iter().enumerate() {
                f(Key::Index(i), item);
            }
        }
        Value::Object(node) => {
            for (k, item) in node.items() {
                f(Key::Field(k.clone()), item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_object_in_order() {
        let v = Value::from(json!({"b": 1, "a": 2}));
        let mut seen = Vec::new();
        each(&v, |k, _| seen.push(k));
        assert_eq!(seen, vec![Key::from("b"), Key::from("a")]);
    }

    #[test]
    fn test_each_array_indices() {
        let v = Value::from(json!(["x", "y"]));
        let mut seen = Vec::new();
        each(&v, |k, item| seen.push((k, item.clone())));
        assert_eq!(seen[1], (Key::Index(1), Value::from("y")));
    }

    #[test]
    fn test_each_scalar_is_empty() {
        let mut calls = 0;
        each(&Value::from(3), |_, _| calls += 1);
        assert_eq!(calls, 0);
    }
}
