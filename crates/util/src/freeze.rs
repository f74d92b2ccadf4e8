use crate::each::each;
use crate::value::Value;

/// Marks a container non-writable; with `deep`, its descendants too.
///
/// Descent stops at nodes that are already frozen.
pub fn freeze(value: &Value, deep: bool) {
    let newly_frozen = match value {
        Value::Array(node) => node.mark_frozen(),
        Value::Object(node) => node.mark_frozen(),
        _ => return,
    };
    if deep && newly_frozen {
        each(value, |_, child| freeze(child, true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shallow_freeze() {
        let v = Value::from(json!({"a": {"b": 1}}));
        freeze(&v, false);
        assert!(v.is_frozen());
        assert!(!v.get("a").unwrap().is_frozen());
    }

    #[test]
    fn test_deep_freeze() {
        let v = Value::from(json!({"a": [{"b": 1}]}));
        freeze(&v, true);
        assert!(v.get("a").unwrap().get(0usize).unwrap().is_frozen());
    }

    #[test]
    fn test_freeze_is_visible_through_clones() {
        let v = Value::from(json!([1]));
        let alias = v.clone();
        freeze(&v, true);
        assert!(alias.is_frozen());
    }
}
