//! Array-style iteration over the top-level keys of a handle.
//!
//! Every callback receives `(value, key, nested)`, where `nested` is a fresh
//! handle over `value` when it is a record and `None` otherwise. Nested
//! handles follow the parent's options: a deep-copy parent hands out
//! handles over copies, a shared parent hands out zero-copy views.
//!
//! A view copies itself on its first write, so edits made through the
//! nested handles of [`Handle::for_each`] stay local to the callback. Use
//! [`Handle::for_each_mut`] to edit nested records in place: on a shared
//! parent its handles borrow the child mutably and write straight into
//! the parent's record.

use std::borrow::Cow;

use obj_iface_util::{clone, is_record};
use serde_json::Value;

use crate::handle::{Handle, Record};
use crate::options::Options;

/// Wrap `value` in a new handle if it is a record.
///
/// Called fresh for every visited key; nested handles are never cached.
pub(crate) fn maybe_wrap(value: &Value, options: Options) -> Option<Handle<'_>> {
    if !is_record(value) {
        return None;
    }
    let value = if options.deep_copy {
        Cow::Owned(clone(value))
    } else {
        Cow::Borrowed(value)
    };
    Some(Handle::local(value, options))
}

/// One entry handed to [`Handle::for_each_mut`].
#[derive(Debug)]
pub enum EntryMut<'a> {
    /// A record, wrapped with the parent's options.
    Record(Handle<'a>),
    /// Any other value, borrowed from the parent.
    Value(&'a mut Value),
}

fn wrap_mut(value: &mut Value, options: Options) -> EntryMut<'_> {
    if !is_record(value) {
        return EntryMut::Value(value);
    }
    if options.deep_copy {
        EntryMut::Record(Handle::local(Cow::Owned(clone(value)), options))
    } else {
        EntryMut::Record(Handle::shared(value, options))
    }
}

impl<'a> Handle<'a> {
    /// Call `f` for every key, in order.
    pub fn for_each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>),
    {
        for (key, value) in self.entries() {
            f(value, key.as_str(), maybe_wrap(value, self.options()));
        }
        self
    }

    /// Call `f` for every key, in order, with mutable access to the value.
    ///
    /// With deep copy disabled, a nested record is handed out as a handle
    /// that borrows it, so writes through that handle land in this
    /// handle's record. With deep copy enabled the nested handle owns a
    /// copy, as in [`for_each`](Self::for_each). Non-record values are
    /// handed out as `&mut Value` either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use obj_iface::{wrap, EntryMut};
    /// use serde_json::json;
    ///
    /// let mut record = json!({"a": 1, "b": {"c": 2}});
    /// let mut h = wrap(&mut record, false).unwrap();
    /// h.for_each_mut(|_, entry| match entry {
    ///     EntryMut::Record(mut nested) => {
    ///         nested.write(&["c"], 100).unwrap();
    ///     }
    ///     EntryMut::Value(value) => *value = json!(0),
    /// });
    /// drop(h);
    /// assert_eq!(record, json!({"a": 0, "b": {"c": 100}}));
    /// ```
    pub fn for_each_mut<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&str, EntryMut<'_>),
    {
        let options = self.options();
        if let Some(record) = self.record_mut() {
            for (key, value) in record.iter_mut() {
                f(key.as_str(), wrap_mut(value, options));
            }
        }
        self
    }

    /// Build a new record from the callback result for every key.
    ///
    /// The working value is not modified. Returns `None` instead of an
    /// empty record.
    ///
    /// # Examples
    ///
    /// ```
    /// use obj_iface::Handle;
    /// use serde_json::{json, Value};
    ///
    /// let h = Handle::new(json!({"a": 1, "b": {"c": 2, "d": 3}})).unwrap();
    /// let sizes = h
    ///     .map(|v, _, nested| match nested {
    ///         Some(nested) => json!(nested.len()),
    ///         None => v.clone(),
    ///     })
    ///     .unwrap();
    /// assert_eq!(Value::Object(sizes), json!({"a": 1, "b": 2}));
    /// ```
    pub fn map<F, T>(&self, mut f: F) -> Option<Record>
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> T,
        T: Into<Value>,
    {
        let out: Record = self
            .entries()
            .map(|(key, value)| {
                let mapped = f(value, key.as_str(), maybe_wrap(value, self.options()));
                (key.clone(), mapped.into())
            })
            .collect();
        non_empty(out)
    }

    /// [`map`](Self::map), with the result wrapped in a handle that
    /// inherits this handle's options.
    pub fn map_wrap<F, T>(&self, f: F) -> Option<Handle<'static>>
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> T,
        T: Into<Value>,
    {
        self.map(f).map(|record| self.wrap_result(record))
    }

    /// Overwrite every value with the callback result for its key.
    pub fn map_in_place<F, T>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> T,
        T: Into<Value>,
    {
        let Some(mapped) = self.map(f) else {
            return self;
        };
        if let Some(record) = self.record_mut() {
            // same keys, so every value keeps its position
            record.extend(mapped);
        }
        self
    }

    /// New record with the entries for which `f` returns `true`.
    ///
    /// Kept values are deep copies. Returns `None` instead of an empty
    /// record.
    pub fn filter<F>(&self, mut f: F) -> Option<Record>
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> bool,
    {
        let out: Record = self
            .entries()
            .filter(|&(key, value)| f(value, key.as_str(), maybe_wrap(value, self.options())))
            .map(|(key, value)| (key.clone(), clone(value)))
            .collect();
        non_empty(out)
    }

    /// [`filter`](Self::filter), with the result wrapped in a handle that
    /// inherits this handle's options.
    pub fn filter_wrap<F>(&self, f: F) -> Option<Handle<'static>>
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> bool,
    {
        self.filter(f).map(|record| self.wrap_result(record))
    }

    /// `true` if `f` holds for every key. Stops at the first `false`.
    pub fn every<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> bool,
    {
        self.entries()
            .all(|(key, value)| f(value, key.as_str(), maybe_wrap(value, self.options())))
    }

    /// `true` if `f` holds for at least one key. Stops at the first `true`.
    pub fn some<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> bool,
    {
        self.entries()
            .any(|(key, value)| f(value, key.as_str(), maybe_wrap(value, self.options())))
    }

    /// First key for which `f` returns `true`.
    pub fn find<F>(&self, f: F) -> Option<String>
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> bool,
    {
        self.find_entry(f).map(|(key, _)| key.to_owned())
    }

    /// First entry for which `f` returns `true`, as `(key, value)`.
    pub fn find_entry<F>(&self, mut f: F) -> Option<(&str, &Value)>
    where
        F: FnMut(&Value, &str, Option<Handle<'_>>) -> bool,
    {
        self.entries()
            .find(|&(key, value)| f(value, key.as_str(), maybe_wrap(value, self.options())))
            .map(|(key, value)| (key.as_str(), value))
    }

    pub(crate) fn wrap_result(&self, record: Record) -> Handle<'static> {
        Handle::local(Cow::Owned(Value::Object(record)), self.options())
    }
}

pub(crate) fn non_empty(record: Record) -> Option<Record> {
    if record.is_empty() {
        None
    } else {
        Some(record)
    }
}
