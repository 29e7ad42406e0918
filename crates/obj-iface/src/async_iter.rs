//! Asynchronous iteration: fire every callback, then join.
//!
//! Each method calls the callback for every key, in key order, before any
//! returned future is polled. The futures are then joined with
//! [`try_join_all`]:
//!
//! - results are reassembled in key order, whatever order they complete in;
//! - the first error is returned as-is and the remaining futures are dropped
//!   without being polled again;
//! - work already done by other callbacks is not undone.
//!
//! There is no timeout. A future that never resolves stalls the join.

use std::future::Future;

use futures::future::try_join_all;
use obj_iface_util::clone;
use serde_json::Value;
use tracing::debug;

use crate::handle::{Handle, Record};
use crate::iter::{maybe_wrap, non_empty};

impl<'a> Handle<'a> {
    /// Call `f` for every key and wait for all of the returned futures.
    ///
    /// # Errors
    ///
    /// The first error returned by a callback future.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::convert::Infallible;
    ///
    /// use obj_iface::Handle;
    /// use serde_json::json;
    ///
    /// # futures::executor::block_on(async {
    /// let h = Handle::new(json!({"a": 1, "b": 2})).unwrap();
    /// let seen = RefCell::new(Vec::new());
    /// h.for_each_async(|_, key, _| {
    ///     let seen = &seen;
    ///     async move {
    ///         seen.borrow_mut().push(key.to_owned());
    ///         Ok::<_, Infallible>(())
    ///     }
    /// })
    /// .await
    /// .unwrap();
    /// assert_eq!(seen.into_inner(), vec!["a", "b"]);
    /// # });
    /// ```
    pub async fn for_each_async<'s, F, Fut, E>(&'s self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&'s Value, &'s str, Option<Handle<'s>>) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let pending = self.fire_all(&mut f);
        self.join(pending).await.map(drop)
    }

    /// Async [`map`](Self::map): a new record of the resolved callback
    /// results, in key order. `None` instead of an empty record.
    ///
    /// # Errors
    ///
    /// The first error returned by a callback future.
    pub async fn map_async<'s, F, Fut, T, E>(&'s self, mut f: F) -> Result<Option<Record>, E>
    where
        F: FnMut(&'s Value, &'s str, Option<Handle<'s>>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Into<Value>,
    {
        let pending = self.fire_all(&mut f);
        let results = self.join(pending).await?;
        let out: Record = self
            .keys()
            .zip(results)
            .map(|(key, mapped)| (key.to_owned(), mapped.into()))
            .collect();
        Ok(non_empty(out))
    }

    /// [`map_async`](Self::map_async), with the result wrapped in a handle
    /// that inherits this handle's options.
    ///
    /// # Errors
    ///
    /// The first error returned by a callback future.
    pub async fn map_async_wrap<'s, F, Fut, T, E>(
        &'s self,
        f: F,
    ) -> Result<Option<Handle<'static>>, E>
    where
        F: FnMut(&'s Value, &'s str, Option<Handle<'s>>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Into<Value>,
    {
        let mapped = self.map_async(f).await?;
        Ok(mapped.map(|record| self.wrap_result(record)))
    }

    /// Async [`filter`](Self::filter): entries whose callback resolved to
    /// `true`, deep-copied, in key order. `None` instead of an empty record.
    ///
    /// # Errors
    ///
    /// The first error returned by a callback future.
    pub async fn filter_async<'s, F, Fut, E>(&'s self, mut f: F) -> Result<Option<Record>, E>
    where
        F: FnMut(&'s Value, &'s str, Option<Handle<'s>>) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        let pending = self.fire_all(&mut f);
        let keep = self.join(pending).await?;
        let out: Record = self
            .entries()
            .zip(keep)
            .filter(|(_, keep)| *keep)
            .map(|((key, value), _)| (key.clone(), clone(value)))
            .collect();
        Ok(non_empty(out))
    }

    /// [`filter_async`](Self::filter_async), with the result wrapped in a
    /// handle that inherits this handle's options.
    ///
    /// # Errors
    ///
    /// The first error returned by a callback future.
    pub async fn filter_async_wrap<'s, F, Fut, E>(
        &'s self,
        f: F,
    ) -> Result<Option<Handle<'static>>, E>
    where
        F: FnMut(&'s Value, &'s str, Option<Handle<'s>>) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        let kept = self.filter_async(f).await?;
        Ok(kept.map(|record| self.wrap_result(record)))
    }

    fn fire_all<'s, F, Fut>(&'s self, f: &mut F) -> Vec<Fut>
    where
        F: FnMut(&'s Value, &'s str, Option<Handle<'s>>) -> Fut,
    {
        self.entries()
            .map(|(key, value)| f(value, key.as_str(), maybe_wrap(value, self.options())))
            .collect()
    }

    async fn join<Fut, T, E>(&self, pending: Vec<Fut>) -> Result<Vec<T>, E>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let count = pending.len();
        match try_join_all(pending).await {
            Ok(results) => Ok(results),
            Err(err) => {
                debug!(keys = count, "async iteration failed");
                Err(err)
            }
        }
    }
}
