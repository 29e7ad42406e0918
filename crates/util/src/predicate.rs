use serde_json::Value;

/// Check if a value is a plain keyed record.
///
/// Only JSON objects qualify: `null`, lists and scalars do not.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use obj_iface_util::predicate::is_record;
///
/// assert!(is_record(&json!({"a": 1})));
/// assert!(!is_record(&json!([1, 2])));
/// assert!(!is_record(&json!(null)));
/// ```
#[inline]
pub fn is_record(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}
