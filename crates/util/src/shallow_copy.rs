use crate::value::{Map, Value};

/// Top-level contents of a container, detached from its node.
///
/// Children are cloned handles, so nested containers stay shared with the
/// source value.
#[derive(Clone, Debug)]
pub enum Shallow {
    Array(Vec<Value>),
    Object(Map),
}

/// Copies one level of an array or object; `None` for scalars.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_draft_util::{shallow_copy, Shallow, Value};
///
/// let base = Value::from(json!({"a": {"x": 1}}));
/// let Some(Shallow::Object(copy)) = shallow_copy(&base) else { panic!() };
/// assert!(copy["a"].ptr_eq(base.get("a").unwrap()));
/// ```
pub fn shallow_copy(value: &Value) -> Option<Shallow> {
    match value {
        Value::Array(node) => Some(Shallow::Array(node.items().clone())),
        Value::Object(node) => Some(Shallow::Object(node.items().clone())),
        _ => None,
    }
}

impl From<Shallow> for Value {
    fn from(shallow: Shallow) -> Self {
        match shallow {
            Shallow::Array(items) => Value::array(items),
            Shallow::Object(entries) => Value::object(entries),
        }
    }
}
