use crate::value::Value;

/// SameValue comparison.
///
/// Scalars compare by value, with `NaN` equal to itself and `+0` distinct
/// from `-0`. Arrays and objects compare by identity.
///
/// # Examples
///
/// ```
/// use json_draft_util::{is, Value};
///
/// assert!(is(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
/// assert!(!is(&Value::Number(0.0), &Value::Number(-0.0)));
///
/// let a = Value::from(serde_json::json!({"x": 1}));
/// let b = Value::from(serde_json::json!({"x": 1}));
/// assert!(is(&a, &a.clone()));
/// assert!(!is(&a, &b));
/// ```
pub fn is(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => same_number(*x, *y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => a.ptr_eq(b),
        _ => false,
    }
}

fn same_number(x: f64, y: f64) -> bool {
    if x.is_nan() {
        return y.is_nan();
    }
    x == y && (x != 0.0 || x.is_sign_negative() == y.is_sign_negative())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nan_is_nan() {
        assert!(is(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
        assert!(!is(&Value::Number(f64::NAN), &Value::Number(1.0)));
    }

    #[test]
    fn test_signed_zeros_differ() {
        assert!(is(&Value::Number(0.0), &Value::Number(0.0)));
        assert!(!is(&Value::Number(0.0), &Value::Number(-0.0)));
    }

    #[test]
    fn test_strings_by_value() {
        assert!(is(&Value::from("a"), &Value::from("a")));
        assert!(!is(&Value::from("a"), &Value::from("b")));
    }

    #[test]
    fn test_containers_by_identity() {
        let a = Value::from(json!([1]));
        assert!(is(&a, &a.clone()));
        assert!(!is(&a, &Value::from(json!([1]))));
    }

    #[test]
    fn test_mixed_kinds() {
        assert!(!is(&Value::Null, &Value::Bool(false)));
        assert!(!is(&Value::from(1), &Value::from("1")));
    }
}
