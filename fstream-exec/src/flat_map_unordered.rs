// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::merge_parallel::{MergeParallel, MergeParallelExt};
use fstream_core::{FStream, Result};
use fstream_runtime::ParallelConfig;
use fstream_stream::MapExt;

/// Extension trait providing the [`flat_map_unordered`](Self::flat_map_unordered) operator.
pub trait FlatMapUnorderedExt: FStream + Sized + 'static {
    /// Expands every item into a sub-stream and merges the sub-streams
    /// concurrently, like `map(f)` followed by
    /// [`merge_parallel`](MergeParallelExt::merge_parallel).
    ///
    /// `f` runs on the harvester that takes the item, under the lock that
    /// serializes pulls from this stream.
    ///
    /// # Errors
    ///
    /// Fails if the worker pool cannot be started.
    ///
    /// ```
    /// use fstream_exec::FlatMapUnorderedExt;
    /// use fstream_runtime::ParallelConfig;
    /// use fstream_stream::{from_iter, IntoFStream, OrThrowExt, TerminalExt};
    ///
    /// let mut repeated = vec![1, 2, 3]
    ///     .into_fstream()
    ///     .flat_map_unordered(&ParallelConfig::new().with_workers(2), |n: usize| {
    ///         from_iter(vec![n; n])
    ///     })
    ///     .unwrap()
    ///     .or_throw()
    ///     .collect_vec()
    ///     .unwrap();
    ///
    /// repeated.sort_unstable();
    /// assert_eq!(repeated, vec![1, 2, 2, 3, 3, 3]);
    /// ```
    fn flat_map_unordered<S, F>(
        self,
        config: &ParallelConfig,
        f: F,
    ) -> Result<MergeParallel<S::Item>>
    where
        F: FnMut(Self::Item) -> S + Send + 'static,
        S: FStream + 'static,
        S::Item: Send + 'static,
    {
        self.map(f).merge_parallel(config)
    }
}

impl<G: FStream + 'static> FlatMapUnorderedExt for G {}
