//! Key paths over nested records.
//!
//! A key path is a sequence of record keys applied one after another from a
//! root value. Lists are opaque: a path never steps into a `Value::Array`.
//! Paths can also be written as RFC 6901-style pointer strings (`"/b/c"`).
//!
//! # Example
//!
//! ```
//! use obj_iface_path::{parse_pointer, format_pointer, get};
//!
//! let path = parse_pointer("/foo/bar").unwrap();
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//!
//! assert_eq!(format_pointer(&path), "/foo/bar");
//!
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(42)));
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

pub mod types;
pub use types::{key_path, KeyPath, PathStep};

pub mod validate;
pub use validate::{validate_path, validate_pointer, MAX_PATH_DEPTH, MAX_POINTER_LENGTH};

/// Unescapes a pointer path component.
///
/// `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use obj_iface_path::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, or "~01" would decode to "/"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a pointer path component.
///
/// `/` is replaced with `~1` and `~` is replaced with `~0`.
///
/// # Example
///
/// ```
/// use obj_iface_path::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a pointer string into a key path.
///
/// - Empty string is the root (empty path)
/// - The leading `/` is stripped
/// - Each component is unescaped
///
/// # Errors
///
/// See [`validate_pointer`].
///
/// # Example
///
/// ```
/// use obj_iface_path::parse_pointer;
///
/// assert_eq!(parse_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_pointer("/").unwrap(), vec![""]);
/// assert_eq!(parse_pointer("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
/// assert!(parse_pointer("no-slash").is_err());
/// ```
pub fn parse_pointer(pointer: &str) -> Result<KeyPath, PathError> {
    validate_pointer(pointer)?;
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    Ok(pointer[1..].split('/').map(unescape_component).collect())
}

/// Format a key path into a pointer string.
///
/// Returns an empty string for the root path.
///
/// # Example
///
/// ```
/// use obj_iface_path::format_pointer;
///
/// assert_eq!(format_pointer::<&str>(&[]), "");
/// assert_eq!(format_pointer(&["foo", "b/r"]), "/foo/b~1r");
/// ```
pub fn format_pointer<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component.as_ref()));
    }
    out
}

/// Get a value by key path.
///
/// Returns `None` if any key is absent or an intermediate value is not a
/// record. The empty path returns the root itself.
///
/// # Example
///
/// ```
/// use obj_iface_path::get;
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": 42}, "list": [1, 2]});
/// assert_eq!(get(&doc, &["foo", "bar"]), Some(&json!(42)));
/// assert_eq!(get(&doc, &["missing"]), None);
/// assert_eq!(get(&doc, &["list", "0"]), None);
/// ```
pub fn get<'a, S: AsRef<str>>(val: &'a Value, path: &[S]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = current.as_object()?.get(step.as_ref())?;
    }
    Some(current)
}

/// Get a mutable reference to a value by key path.
///
/// Same lookup rules as [`get`].
pub fn get_mut<'a, S: AsRef<str>>(val: &'a mut Value, path: &[S]) -> Option<&'a mut Value> {
    let mut current = val;
    for step in path {
        current = current.as_object_mut()?.get_mut(step.as_ref())?;
    }
    Some(current)
}

/// Get the record holding the last key of `path`, without creating anything.
///
/// Returns `None` for the root path or when the parent is missing or not a
/// record.
pub fn parent_mut<'a, S: AsRef<str>>(
    val: &'a mut Value,
    path: &[S],
) -> Option<&'a mut Map<String, Value>> {
    let (_, init) = path.split_last()?;
    get_mut(val, init)?.as_object_mut()
}

/// Check, without modifying `val`, that [`parent_mut_or_insert`] would
/// succeed for `path`.
///
/// # Errors
///
/// The same errors [`parent_mut_or_insert`] would return.
///
/// # Example
///
/// ```
/// use obj_iface_path::check_insert;
/// use serde_json::json;
///
/// let doc = json!({"a": 1, "b": {}});
/// assert!(check_insert(&doc, &["b", "x", "y"]).is_ok());
/// assert!(check_insert(&doc, &["a", "x"]).is_err());
/// ```
pub fn check_insert<S: AsRef<str>>(val: &Value, path: &[S]) -> Result<(), PathError> {
    let (_, init) = path.split_last().ok_or(PathError::NoParent)?;
    let mut current = val;
    for (depth, step) in init.iter().enumerate() {
        let map = current
            .as_object()
            .ok_or_else(|| PathError::not_a_record(&path[..depth]))?;
        match map.get(step.as_ref()) {
            Some(next) => current = next,
            // everything below an absent key gets bridged
            None => return Ok(()),
        }
    }
    if current.is_object() {
        Ok(())
    } else {
        Err(PathError::not_a_record(init))
    }
}

/// Get the record holding the last key of `path`, inserting an empty record
/// for every absent intermediate key on the way.
///
/// # Errors
///
/// - [`PathError::NoParent`] for the root path
/// - [`PathError::NotARecord`] when an existing value on the way (the root
///   included) is not a record; `path` names that value
///
/// # Example
///
/// ```
/// use obj_iface_path::parent_mut_or_insert;
/// use serde_json::json;
///
/// let mut doc = json!({});
/// parent_mut_or_insert(&mut doc, &["f", "g", "h"]).unwrap().insert("h".into(), json!(1));
/// assert_eq!(doc, json!({"f": {"g": {"h": 1}}}));
/// ```
pub fn parent_mut_or_insert<'a, S: AsRef<str>>(
    val: &'a mut Value,
    path: &[S],
) -> Result<&'a mut Map<String, Value>, PathError> {
    let (_, init) = path.split_last().ok_or(PathError::NoParent)?;
    let mut current = val;
    for (depth, step) in init.iter().enumerate() {
        let map = match current {
            Value::Object(map) => map,
            _ => return Err(PathError::not_a_record(&path[..depth])),
        };
        current = map
            .entry(step.as_ref())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    match current {
        Value::Object(map) => Ok(map),
        _ => Err(PathError::not_a_record(init)),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("NO_PARENT")]
    NoParent,
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("PATH_TOO_DEEP: {0} keys")]
    PathTooDeep(usize),
    #[error("NOT_A_RECORD at {}", format_pointer::<String>(.path))]
    NotARecord { path: KeyPath },
}

impl PathError {
    fn not_a_record<S: AsRef<str>>(path: &[S]) -> Self {
        PathError::NotARecord {
            path: key_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("foo"), "foo");
        assert_eq!(unescape_component("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_component("~01"), "~1");
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component("~/"), "~0~1");
    }

    #[test]
    fn test_parse_pointer() {
        assert_eq!(parse_pointer("").unwrap(), Vec::<String>::new());
        assert_eq!(parse_pointer("/a//b").unwrap(), vec!["a", "", "b"]);
        assert_eq!(parse_pointer("x"), Err(PathError::PointerInvalid));
    }

    #[test]
    fn test_format_pointer() {
        assert_eq!(format_pointer(&["a~b", "c/d"]), "/a~0b/c~1d");
        assert_eq!(format_pointer(&[""]), "/");
    }

    #[test]
    fn test_get_root() {
        let doc = json!({"a": 1});
        assert_eq!(get::<&str>(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_get_through_scalar() {
        let doc = json!({"a": 1});
        assert_eq!(get(&doc, &["a", "z"]), None);
    }

    #[test]
    fn test_get_null_is_present() {
        let doc = json!({"a": null});
        assert_eq!(get(&doc, &["a"]), Some(&Value::Null));
        assert_eq!(get(&doc, &["a", "b"]), None);
    }

    #[test]
    fn test_get_mut() {
        let mut doc = json!({"b": {"c": 2}});
        *get_mut(&mut doc, &["b", "c"]).unwrap() = json!(9);
        assert_eq!(doc, json!({"b": {"c": 9}}));
        assert!(get_mut(&mut doc, &["b", "x"]).is_none());
    }

    #[test]
    fn test_parent_mut() {
        let mut doc = json!({"b": {"c": 2}});
        assert!(parent_mut(&mut doc, &["b", "c"]).unwrap().contains_key("c"));
        assert!(parent_mut(&mut doc, &["z", "c"]).is_none());
        assert!(parent_mut::<&str>(&mut doc, &[]).is_none());
    }

    #[test]
    fn test_parent_mut_or_insert_existing() {
        let mut doc = json!({"b": {"c": 2}});
        let map = parent_mut_or_insert(&mut doc, &["b", "d"]).unwrap();
        map.insert("d".into(), json!(3));
        assert_eq!(doc, json!({"b": {"c": 2, "d": 3}}));
    }

    #[test]
    fn test_parent_mut_or_insert_not_a_record() {
        let mut doc = json!({"a": 1, "n": null});
        assert_eq!(
            parent_mut_or_insert(&mut doc, &["a", "b", "c"]),
            Err(PathError::NotARecord {
                path: vec!["a".into()]
            })
        );
        assert_eq!(
            parent_mut_or_insert(&mut doc, &["n", "x"]),
            Err(PathError::NotARecord {
                path: vec!["n".into()]
            })
        );
        // nothing was bridged on failure
        assert_eq!(doc, json!({"a": 1, "n": null}));
    }

    #[test]
    fn test_parent_mut_or_insert_root_not_record() {
        let mut doc = json!(5);
        assert_eq!(
            parent_mut_or_insert(&mut doc, &["x"]),
            Err(PathError::NotARecord { path: vec![] })
        );
    }

    #[test]
    fn test_check_insert_agrees_with_insert() {
        let doc = json!({"a": 1, "b": {"c": {}}, "n": null});
        for path in [
            vec!["b", "c", "d"],
            vec!["b", "x", "y", "z"],
            vec!["a", "b"],
            vec!["n", "x"],
            vec!["b", "c"],
            vec!["q"],
        ] {
            let mut copy = doc.clone();
            let expected = parent_mut_or_insert(&mut copy, &path).map(drop);
            assert_eq!(check_insert(&doc, &path), expected, "{path:?}");
        }
    }

    #[test]
    fn test_root_has_no_parent() {
        let mut doc = json!({});
        assert_eq!(check_insert::<&str>(&doc, &[]), Err(PathError::NoParent));
        assert_eq!(
            parent_mut_or_insert::<&str>(&mut doc, &[]),
            Err(PathError::NoParent)
        );
    }

    #[test]
    fn test_not_a_record_display() {
        let err = PathError::NotARecord {
            path: vec!["a".into(), "b/c".into()],
        };
        assert_eq!(err.to_string(), "NOT_A_RECORD at /a/b~1c");
    }
}
