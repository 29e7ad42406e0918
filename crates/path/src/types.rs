//! Type definitions for key paths.

/// A single key in a key path.
pub type PathStep = String;

/// An owned key path: keys applied one after another from the root record.
pub type KeyPath = Vec<PathStep>;

/// Build an owned [`KeyPath`] from anything yielding string-like keys.
///
/// # Example
///
/// ```
/// use obj_iface_path::key_path;
///
/// assert_eq!(key_path(["b", "c"]), vec!["b".to_string(), "c".to_string()]);
/// ```
pub fn key_path<I, S>(keys: I) -> KeyPath
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter().map(|k| k.as_ref().to_owned()).collect()
}
