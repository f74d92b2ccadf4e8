use crate::value::Value;

/// Whether a value can be drafted: plain arrays and objects only.
pub fn is_draftable(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_containers_are_draftable() {
        assert!(is_draftable(&Value::from(json!({}))));
        assert!(is_draftable(&Value::from(json!([]))));
    }

    #[test]
    fn test_scalars_are_not() {
        for v in [json!(null), json!(true), json!(1.5), json!("s")] {
            assert!(!is_draftable(&Value::from(v)));
        }
    }
}
