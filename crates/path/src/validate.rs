//! Limits on pointer strings and key paths.

use crate::PathError;

/// Maximum allowed pointer string length.
pub const MAX_POINTER_LENGTH: usize = 1024;

/// Deepest key path a write may create or walk.
pub const MAX_PATH_DEPTH: usize = 256;

/// Validate a pointer string.
///
/// # Errors
///
/// Returns an error if:
/// - The pointer is non-empty but doesn't start with `/`
/// - The pointer exceeds the maximum length (1024 bytes)
///
/// # Example
///
/// ```
/// use obj_iface_path::validate_pointer;
///
/// validate_pointer("").unwrap();
/// validate_pointer("/foo/bar").unwrap();
/// validate_pointer("foo").unwrap_err();
/// ```
pub fn validate_pointer(pointer: &str) -> Result<(), PathError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(PathError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(PathError::PointerTooLong);
    }
    Ok(())
}

/// Reject key paths deeper than [`MAX_PATH_DEPTH`].
///
/// # Errors
///
/// [`PathError::PathTooDeep`] with the offending depth.
pub fn validate_path<S: AsRef<str>>(path: &[S]) -> Result<(), PathError> {
    match path.len() {
        depth if depth > MAX_PATH_DEPTH => Err(PathError::PathTooDeep(depth)),
        _ => Ok(()),
    }
}
