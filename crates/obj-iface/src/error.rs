//! Error type for record interface operations.

use obj_iface_path::{format_pointer, KeyPath, PathError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`Handle`](crate::Handle).
///
/// Missing keys, removing nothing and empty iteration results are not
/// errors; they come back as `None` or a no-op.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input that cannot back a handle, or a malformed pointer string.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A write had to step through a value that is not a record.
    #[error("not a record at {}", format_pointer::<String>(.path))]
    NotARecord { path: KeyPath },
}

impl Error {
    pub(crate) fn not_record_input(value: &serde_json::Value) -> Self {
        Error::InvalidArgument(format!("expected a record, got {}", kind_of(value)))
    }
}

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NotARecord { path } => Error::NotARecord { path },
            other => Error::InvalidArgument(other.to_string()),
        }
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "record",
    }
}
