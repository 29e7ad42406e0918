//! The record handle: construction, property access and whole-record copies.

use std::borrow::Cow;

use obj_iface_path::{self as keypath, format_pointer, parse_pointer};
use obj_iface_util::{clone, deep_merge, is_record};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::options::Options;

/// An ordered record: string keys to JSON values, in insertion order.
pub type Record = Map<String, Value>;

/// Where a handle's working value lives.
#[derive(Debug)]
enum Slot<'a> {
    /// Exclusively owned, or a read view that turns owned on first write.
    Local(Cow<'a, Value>),
    /// The caller's own value.
    Shared(&'a mut Value),
}

impl Slot<'_> {
    fn get(&self) -> &Value {
        match self {
            Slot::Local(cow) => &**cow,
            Slot::Shared(value) => &**value,
        }
    }

    fn to_mut(&mut self) -> &mut Value {
        match self {
            Slot::Local(cow) => cow.to_mut(),
            Slot::Shared(value) => &mut **value,
        }
    }
}

/// A fluent interface over one JSON record.
///
/// Built with [`wrap`], [`Handle::new`], [`Handle::with_options`] or
/// [`Handle::view`]. All operations act on the handle's working value,
/// which is either a deep copy of the input or the input itself.
///
/// # Examples
///
/// ```
/// use obj_iface::wrap;
/// use serde_json::json;
///
/// let mut record = json!({"a": 1, "b": {"c": 2, "d": 3}});
/// let mut h = wrap(&mut record, true).unwrap();
///
/// h.write(&["b", "c"], 9).unwrap().remove(&["a"]);
/// assert_eq!(h.get(&["b", "c"]), Some(&json!(9)));
/// assert_eq!(h.get(&["a"]), None);
///
/// drop(h);
/// assert_eq!(record["b"]["c"], json!(2));
/// ```
#[derive(Debug)]
pub struct Handle<'a> {
    slot: Slot<'a>,
    options: Options,
}

/// Wrap a record, copying it first when `deep_copy` is set.
///
/// With `deep_copy` disabled the handle borrows `input`; every change made
/// through the handle is visible in `input` once the handle is dropped.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `input` is not a record.
pub fn wrap(input: &mut Value, deep_copy: bool) -> Result<Handle<'_>> {
    Handle::with_options(input, Options { deep_copy })
}

impl<'a> Handle<'a> {
    /// Wrap `input` according to `options`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `input` is not a record.
    pub fn with_options(input: &'a mut Value, options: Options) -> Result<Self> {
        if !is_record(input) {
            return Err(Error::not_record_input(input));
        }
        debug!(deep_copy = options.deep_copy, "wrapping record");
        let slot = if options.deep_copy {
            Slot::Local(Cow::Owned(clone(input)))
        } else {
            Slot::Shared(input)
        };
        Ok(Self { slot, options })
    }

    /// Wrap a borrowed record without copying it.
    ///
    /// Reads and iteration go straight to `input`. The first write copies
    /// it, so `input` itself is never modified.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `input` is not a record.
    pub fn view(input: &'a Value) -> Result<Self> {
        if !is_record(input) {
            return Err(Error::not_record_input(input));
        }
        Ok(Self::local(Cow::Borrowed(input), Options::shared()))
    }

    pub(crate) fn local(value: Cow<'a, Value>, options: Options) -> Self {
        Self {
            slot: Slot::Local(value),
            options,
        }
    }

    pub(crate) fn shared(value: &'a mut Value, options: Options) -> Self {
        Self {
            slot: Slot::Shared(value),
            options,
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn is_deep_copy(&self) -> bool {
        self.options.deep_copy
    }

    /// The whole working value, by reference.
    pub fn read(&self) -> &Value {
        self.slot.get()
    }

    /// The working value as a record, or `None` after it was replaced by
    /// something else.
    pub fn record(&self) -> Option<&Record> {
        self.read().as_object()
    }

    /// Value at a key path.
    ///
    /// The empty path yields the whole working value. Returns `None` when
    /// a key is absent or an intermediate value is not a record; a stored
    /// `null` is `Some(&Value::Null)`.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
        keypath::get(self.read(), path)
    }

    /// Like [`get`](Self::get), with the path given as a pointer string
    /// such as `"/b/c"`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the pointer is malformed.
    pub fn get_pointer(&self, pointer: &str) -> Result<Option<&Value>> {
        let path = parse_pointer(pointer)?;
        Ok(self.get(&path))
    }

    pub fn contains<S: AsRef<str>>(&self, path: &[S]) -> bool {
        !path.is_empty() && self.get(path).is_some()
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.record().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The working record for in-place edits. A view is copied first;
    /// `None` when the working value is not a record.
    pub(crate) fn record_mut(&mut self) -> Option<&mut Record> {
        if self.record().is_none() {
            return None;
        }
        self.slot.to_mut().as_object_mut()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.record().into_iter().flatten()
    }

    /// Store `value` at a key path, creating empty records for absent
    /// intermediate keys.
    ///
    /// The empty path replaces the whole working value; anything may be
    /// installed that way, after which nested writes fail.
    ///
    /// # Errors
    ///
    /// [`Error::NotARecord`] if an existing value on the path is not a
    /// record, [`Error::InvalidArgument`] for a path deeper than
    /// [`MAX_PATH_DEPTH`](obj_iface_path::MAX_PATH_DEPTH). Nothing is
    /// modified in either case.
    pub fn write<S: AsRef<str>>(
        &mut self,
        path: &[S],
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let value = value.into();
        let Some(last) = path.last() else {
            debug!("replacing working value");
            *self.slot.to_mut() = value;
            return Ok(self);
        };
        keypath::validate_path(path)?;
        // a failed write must leave a view borrowed
        keypath::check_insert(self.read(), path)?;
        trace!(path = %format_pointer(path), "write");
        let parent = keypath::parent_mut_or_insert(self.slot.to_mut(), path)?;
        parent.insert(last.as_ref().to_owned(), value);
        Ok(self)
    }

    /// Like [`write`](Self::write), with the path given as a pointer string.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for a malformed pointer, otherwise as
    /// [`write`](Self::write).
    pub fn write_pointer(&mut self, pointer: &str, value: impl Into<Value>) -> Result<&mut Self> {
        let path = parse_pointer(pointer)?;
        self.write(&path, value)
    }

    /// Replace the whole working value.
    pub fn replace(&mut self, value: impl Into<Value>) -> &mut Self {
        debug!("replacing working value");
        *self.slot.to_mut() = value.into();
        self
    }

    /// Delete the value at a key path.
    ///
    /// Silently does nothing for the empty path, a missing key or a missing
    /// intermediate record. The remaining keys keep their order.
    pub fn remove<S: AsRef<str>>(&mut self, path: &[S]) -> &mut Self {
        self.take(path);
        self
    }

    /// Like [`remove`](Self::remove), with the path given as a pointer string.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for a malformed pointer.
    pub fn remove_pointer(&mut self, pointer: &str) -> Result<&mut Self> {
        let path = parse_pointer(pointer)?;
        Ok(self.remove(&path))
    }

    /// Delete the value at a key path and return it.
    pub fn take<S: AsRef<str>>(&mut self, path: &[S]) -> Option<Value> {
        let last = path.last()?;
        // look first, so a missing path never turns a view into a copy
        self.get(path)?;
        let removed = keypath::parent_mut(self.slot.to_mut(), path)?.shift_remove(last.as_ref());
        trace!(path = %format_pointer(path), "removed");
        removed
    }

    /// Deep copy of the working value.
    pub fn clone_record(&self) -> Value {
        clone(self.read())
    }

    /// Deep copy of the working value, wrapped in a new handle that owns it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the working value is no longer a record.
    pub fn clone_wrap(&self) -> Result<Handle<'static>> {
        Handle::owned(self.clone_record(), Options::shared())
    }

    /// Deep-merge `sources`, in order, on top of a copy of the working value.
    ///
    /// Records merge recursively; any other value replaces what was there.
    /// The working value is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use obj_iface::Handle;
    /// use serde_json::json;
    ///
    /// let h = Handle::new(json!({"a": 1, "b": {"c": 2, "d": 3}})).unwrap();
    /// let merged = h.assign([&json!({"b": {"c": 9}}), &json!({"b": {"d": 9}})]);
    /// assert_eq!(merged, json!({"a": 1, "b": {"c": 9, "d": 9}}));
    /// assert_eq!(h.get(&["b", "c"]), Some(&json!(2)));
    /// ```
    pub fn assign<'s, I>(&self, sources: I) -> Value
    where
        I: IntoIterator<Item = &'s Value>,
    {
        deep_merge(self.read(), sources)
    }

    /// Consume the handle, returning the working value.
    ///
    /// Shared and view handles return a copy; the caller keeps the original.
    pub fn into_value(self) -> Value {
        match self.slot {
            Slot::Local(cow) => cow.into_owned(),
            Slot::Shared(value) => clone(value),
        }
    }
}

impl Handle<'static> {
    /// Wrap an owned record with default options.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `value` is not a record.
    pub fn new(value: Value) -> Result<Self> {
        Self::owned(value, Options::default())
    }

    /// Wrap an owned record. `options` only affects nested handles, since
    /// the value is already exclusively owned.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `value` is not a record.
    pub fn owned(value: Value, options: Options) -> Result<Self> {
        if !is_record(&value) {
            return Err(Error::not_record_input(&value));
        }
        Ok(Self::local(Cow::Owned(value), options))
    }
}

impl From<Record> for Handle<'static> {
    fn from(record: Record) -> Self {
        Self::local(Cow::Owned(Value::Object(record)), Options::default())
    }
}
