// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Mapping on worker threads.
//!
//! `map_async` keeps up to `workers` applications of the mapping function in
//! flight and yields their results either in input order
//! ([`map_async`](MapAsyncExt::map_async)) or as they complete
//! ([`map_async_unordered`](MapAsyncExt::map_async_unordered)).
//!
//! Each result is a [`StreamItem`]: an `Err` returned by the function, or a
//! panic inside it, becomes `StreamItem::Error` for that item only. Chain
//! [`or_throw`](fstream_stream::OrThrowExt::or_throw) (or call
//! [`map_async_or_throw`](MapAsyncExt::map_async_or_throw)) to stop at the
//! first failure instead.
//!
//! An error returned by the upstream's own `next()` ends the output with that
//! error after the results of the items pulled before it.

mod ordered;
mod unordered;

pub use ordered::MapAsync;
pub use unordered::MapAsyncUnordered;

use fstream_core::{BoxFStream, FStream, FStreamError, Result, StreamItem};
use fstream_runtime::ParallelConfig;
use fstream_stream::{BoxedExt, OrThrow, OrThrowExt};

/// Extension trait providing the async map operators.
pub trait MapAsyncExt: FStream + Sized + 'static {
    /// Maps every item on a worker, yielding results in input order.
    ///
    /// Up to `config.workers()` items are mapped concurrently. When the
    /// oldest result is taken, a task for the next upstream item is started.
    ///
    /// # Errors
    ///
    /// Fails if the worker pool cannot be started or rejects the first tasks.
    fn map_async<U, E, F>(self, config: &ParallelConfig, f: F) -> Result<MapAsync<Self, F, U>>
    where
        Self::Item: Send + 'static,
        U: Send + 'static,
        E: Into<FStreamError>,
        F: Fn(Self::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        MapAsync::new(self, config, f)
    }

    /// Maps every item on a worker, yielding results as soon as they are ready.
    ///
    /// Each of the `config.workers()` slots pulls an item, maps it, delivers
    /// the result and then resubmits itself. The output ends when the last
    /// slot finds the upstream exhausted.
    ///
    /// # Errors
    ///
    /// Fails if the worker pool cannot be started or rejects the slots.
    fn map_async_unordered<U, E, F>(
        self,
        config: &ParallelConfig,
        f: F,
    ) -> Result<MapAsyncUnordered<U>>
    where
        Self::Item: Send + 'static,
        U: Send + 'static,
        E: Into<FStreamError>,
        F: Fn(Self::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        MapAsyncUnordered::new(self, config, f)
    }

    /// [`map_async`](Self::map_async) in either ordering mode.
    ///
    /// # Errors
    ///
    /// Same as the selected operator.
    fn map_async_with_order<U, E, F>(
        self,
        config: &ParallelConfig,
        preserve_order: bool,
        f: F,
    ) -> Result<BoxFStream<StreamItem<U>>>
    where
        Self::Item: Send + 'static,
        U: Send + 'static,
        E: Into<FStreamError>,
        F: Fn(Self::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        if preserve_order {
            Ok(self.map_async(config, f)?.boxed())
        } else {
            Ok(self.map_async_unordered(config, f)?.boxed())
        }
    }

    /// Ordered [`map_async`](Self::map_async) whose first failed item closes
    /// the stream and is returned as its error.
    ///
    /// # Errors
    ///
    /// Same as [`map_async`](Self::map_async).
    fn map_async_or_throw<U, E, F>(
        self,
        config: &ParallelConfig,
        f: F,
    ) -> Result<OrThrow<MapAsync<Self, F, U>>>
    where
        Self::Item: Send + 'static,
        U: Send + 'static,
        E: Into<FStreamError>,
        F: Fn(Self::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        Ok(self.map_async(config, f)?.or_throw())
    }
}

impl<S: FStream + 'static> MapAsyncExt for S {}

fn evaluate<T, U, E, F>(f: &F, item: T) -> StreamItem<U>
where
    E: Into<FStreamError>,
    F: Fn(T) -> std::result::Result<U, E>,
{
    StreamItem::from(f(item).map_err(Into::into))
}
