//! Deep merge of JSON records.
//!
//! Records merge key by key, recursively. Any other value (scalars, `null`,
//! lists) replaces the target wholesale with a deep copy of the source.

use serde_json::Value;

use crate::json_clone::clone;

/// Merge `source` into `target` in place.
///
/// When both sides are records, each source key is merged into the target
/// key of the same name; keys already in `target` keep their position and
/// new keys are appended in source order. Otherwise `target` becomes a deep
/// copy of `source`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use obj_iface_util::merge::merge_into;
///
/// let mut target = json!({"a": 1, "b": {"c": 2}});
/// merge_into(&mut target, &json!({"b": {"d": 3}}));
/// assert_eq!(target, json!({"a": 1, "b": {"c": 2, "d": 3}}));
/// ```
pub fn merge_into(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, val) in src {
                match dst.get_mut(key) {
                    Some(existing) => merge_into(existing, val),
                    None => {
                        dst.insert(key.clone(), clone(val));
                    }
                }
            }
        }
        (target, source) => *target = clone(source),
    }
}

/// Deep-merge `sources` in order on top of a copy of `base`.
///
/// Later sources win on conflicting non-record keys. Neither `base` nor any
/// source is modified; with no sources the result is a deep copy of `base`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use obj_iface_util::merge::deep_merge;
///
/// let base = json!({"b": {"c": 2}});
/// let merged = deep_merge(&base, [&json!({"b": {"c": 9}}), &json!({"b": {"d": 9}})]);
/// assert_eq!(merged, json!({"b": {"c": 9, "d": 9}}));
/// assert_eq!(base, json!({"b": {"c": 2}}));
/// ```
pub fn deep_merge<'s, I>(base: &Value, sources: I) -> Value
where
    I: IntoIterator<Item = &'s Value>,
{
    let mut out = clone(base);
    for source in sources {
        merge_into(&mut out, source);
    }
    out
}
