// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent operators for fstream.
//!
//! Every operator here keeps the pull-based [`FStream`](fstream_core::FStream)
//! contract on the outside and does its work on background threads, with a
//! [`SuppliableStream`](fstream_core::SuppliableStream) between the workers
//! and the consumer.
//!
//! | Operator | Ordering | Items |
//! |----------|----------|-------|
//! | [`map_async`](MapAsyncExt::map_async) | input order | `StreamItem<U>` |
//! | [`map_async_unordered`](MapAsyncExt::map_async_unordered) | completion order | `StreamItem<U>` |
//! | [`flat_map_unordered`](FlatMapUnorderedExt::flat_map_unordered) | none | `StreamItem<U>` |
//! | [`merge_parallel`](MergeParallelExt::merge_parallel) | none | `StreamItem<T>` |
//! | [`group_dynamic`](GroupDynamicExt::group_dynamic) | input order per key | [`Group<K, T>`] |
//! | [`prefetch`](PrefetchExt::prefetch) | input order | `T` |
//!
//! A failure that belongs to one item (the mapping function returned `Err`
//! or panicked, a sub-stream failed) is delivered as `StreamItem::Error` and
//! the other items keep flowing. A failure of the upstream itself ends the
//! output with that error once everything produced before it was delivered.
//!
//! `close()` cancels background work cooperatively: workers check a
//! cancellation token between items and every channel they could be parked
//! on is closed. Dropping a concurrent operator closes it.
//!
//! ```
//! use fstream_core::FStreamError;
//! use fstream_exec::MapAsyncExt;
//! use fstream_runtime::ParallelConfig;
//! use fstream_stream::{IntoFStream, OrThrowExt, TerminalExt};
//!
//! let config = ParallelConfig::new().with_workers(3);
//! let lengths = vec!["a", "bb", "ccc"]
//!     .into_fstream()
//!     .map_async(&config, |s: &str| Ok::<_, FStreamError>(s.len()))
//!     .unwrap()
//!     .or_throw()
//!     .collect_vec()
//!     .unwrap();
//!
//! assert_eq!(lengths, vec![1, 2, 3]);
//! ```

mod logging;
mod shared_source;

pub mod flat_map_unordered;
pub mod group_dynamic;
pub mod map_async;
pub mod merge_parallel;
pub mod prefetch;

pub use flat_map_unordered::FlatMapUnorderedExt;
pub use group_dynamic::{Group, GroupDynamicExt, GroupedStream};
pub use map_async::{MapAsync, MapAsyncExt, MapAsyncUnordered};
pub use merge_parallel::{merge_parallel_all, MergeParallel, MergeParallelExt};
pub use prefetch::{Prefetch, PrefetchExt};
