use serde::{Deserialize, Serialize};

/// Construction options for a [`Handle`](crate::Handle).
///
/// Nested handles handed to iteration callbacks, and handles returned by
/// `map_wrap` / `filter_wrap`, inherit the options of their parent.
///
/// # Examples
///
/// ```
/// use obj_iface::Options;
///
/// let opts: Options = serde_json::from_str("{}").unwrap();
/// assert!(opts.deep_copy);
///
/// let opts: Options = serde_json::from_str(r#"{"deep_copy": false}"#).unwrap();
/// assert_eq!(opts, Options::shared());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Work on an independent deep copy of the input. Default is `true`.
    pub deep_copy: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { deep_copy: true }
    }
}

impl Options {
    /// Options that operate on the caller's record in place.
    pub fn shared() -> Self {
        Self { deep_copy: false }
    }
}
