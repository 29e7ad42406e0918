use serde_json::{Map, Value};

/// Creates a deep clone of any JSON value.
///
/// Every nested record and list is rebuilt, so the result shares no
/// structure with the input.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use obj_iface_util::json_clone::clone;
///
/// let original = json!({"foo": [1, 2, 3]});
/// let cloned = clone(&original);
///
/// assert_eq!(original, cloned);
/// ```
pub fn clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(clone).collect()),
        Value::Object(obj) => Value::Object(clone_record(obj)),
    }
}

/// Deep clone of a record, keeping key order.
pub fn clone_record(record: &Map<String, Value>) -> Map<String, Value> {
    let mut new_obj = Map::with_capacity(record.len());
    for (key, val) in record {
        new_obj.insert(key.clone(), clone(val));
    }
    new_obj
}
