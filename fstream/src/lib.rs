// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # fstream
//!
//! Pull-based streams for programs that run on plain OS threads.
//!
//! ## Overview
//!
//! An [`FStream`] is a cursor: `next()` blocks until an item is available
//! and `close()` releases the stream and everything it owns. Operators wrap
//! their upstream and are themselves streams, so pipelines are built by
//! chaining extension methods and drained with a terminal operation.
//!
//! Work that should not happen on the consumer thread is pushed to worker
//! threads by the operators in [`fstream_exec`]. They talk to the consumer
//! through a bounded [`SuppliableStream`], so a slow consumer slows the
//! workers down instead of letting buffers grow.
//!
//! ## Crates
//!
//! - `fstream-core`: the [`FStream`] contract, [`StreamItem`], [`SuppliableStream`]
//! - `fstream-runtime`: [`ThreadPool`], [`ParallelConfig`] and task handles
//! - `fstream-stream`: sources, chaining operators, `quasi_sort` and `top_k`
//! - `fstream-exec`: `map_async`, `merge_parallel`, `group_dynamic`, `prefetch`
//!
//! ## Quick Start
//!
//! ```
//! use fstream::prelude::*;
//!
//! let config = ParallelConfig::new().with_workers(4);
//!
//! let largest_squares = (1..=100u64)
//!     .into_fstream()
//!     .prefetch(16)
//!     .map_async_or_throw(&config, |x| Ok::<_, FStreamError>(x * x))
//!     .unwrap()
//!     .top_k(3)
//!     .unwrap()
//!     .collect_vec()
//!     .unwrap();
//!
//! assert_eq!(largest_squares, vec![10_000, 9_801, 9_604]);
//! ```

pub use fstream_core::{
    BoxFStream, CancellationToken, CloseGuard, FStream, FStreamError, IntoFStreamError, Received,
    Result, ResultExt, StreamItem, Supplied, SuppliableStream,
};
pub use fstream_exec::{
    merge_parallel_all, FlatMapUnorderedExt, Group, GroupDynamicExt, GroupedStream, MapAsync,
    MapAsyncExt, MapAsyncUnordered, MergeParallel, MergeParallelExt, Prefetch, PrefetchExt,
};
pub use fstream_runtime::{
    default_parallelism, Executor, NewThreadExecutor, ParallelConfig, SharedExecutor, TaskHandle,
    ThreadPool,
};
pub use fstream_stream::{
    empty, from_iter, from_producer, once, repeat_with, unfold, BoxedExt, FilterExt, IntoFStream,
    MapExt, OrThrowExt, QuasiSortExt, TakeExt, TapExt, TerminalExt, TopK, TopKExt,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use fstream_core::{FStream, FStreamError, StreamItem, SuppliableStream};
    pub use fstream_exec::{
        FlatMapUnorderedExt, GroupDynamicExt, MapAsyncExt, MergeParallelExt, PrefetchExt,
    };
    pub use fstream_runtime::ParallelConfig;
    pub use fstream_stream::{
        BoxedExt, FilterExt, IntoFStream, MapExt, OrThrowExt, QuasiSortExt, TakeExt, TapExt,
        TerminalExt, TopKExt,
    };
}
