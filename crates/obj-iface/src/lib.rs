//! obj-iface - an array-method-like interface over nested JSON records.
//!
//! [`wrap`] a record to get a [`Handle`], then read, write and remove
//! properties by key path, iterate the top-level keys with `for_each`,
//! `map`, `filter`, `every`, `some` and `find` (plus `*_async` variants),
//! and take deep copies or deep merges of the whole record.
//!
//! # Example
//!
//! ```
//! use obj_iface::wrap;
//! use serde_json::{json, Value};
//!
//! let mut record = json!({"a": 1, "b": {"c": 2, "d": 3}, "e": [4, 5]});
//! let h = wrap(&mut record, true).unwrap();
//!
//! assert_eq!(h.get(&["b", "c"]), Some(&json!(2)));
//! assert_eq!(h.find(|v, _, _| v.is_array()), Some("e".to_string()));
//!
//! let only_a = h.filter(|_, k, _| k == "a").unwrap();
//! assert_eq!(Value::Object(only_a), json!({"a": 1}));
//! ```

mod async_iter;
pub mod error;
mod handle;
mod iter;
pub mod options;

pub use error::{Error, Result};
pub use handle::{wrap, Handle, Record};
pub use iter::EntryMut;
pub use obj_iface_path::KeyPath;
pub use options::Options;
