// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-threaded building blocks for fstream pipelines.
//!
//! # Sources
//!
//! - [`from_iter`] / [`IntoFStream`]: any iterator
//! - [`once`], [`empty`]
//! - [`unfold`]: a generator function with an initial state
//! - [`repeat_with`]: an endless generator
//! - [`from_producer`]: a callback pushing into a bounded channel from its own thread
//!
//! # Chaining operators
//!
//! Each operator comes from its own extension trait, implemented for every
//! [`FStream`](fstream_core::FStream):
//!
//! - [`map`](MapExt::map), [`filter`](FilterExt::filter), [`take`](TakeExt::take),
//!   [`tap`](TapExt::tap), [`boxed`](BoxedExt::boxed)
//! - [`or_throw`](OrThrowExt::or_throw): turns per-item failures into a stream error
//!
//! # Bounded-window reordering
//!
//! - [`quasi_sort`](QuasiSortExt::quasi_sort): approximately sorts with a fixed lookahead
//! - [`top_k`](TopKExt::top_k): keeps the `k` greatest items
//!
//! # Terminal operations
//!
//! [`TerminalExt`] drains a stream and closes it exactly once, whether
//! consumption completes, fails or unwinds.
//!
//! ```
//! use fstream_stream::{FilterExt, IntoFStream, MapExt, TerminalExt};
//!
//! let squares = (1..=6)
//!     .into_fstream()
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * x)
//!     .collect_vec()
//!     .unwrap();
//!
//! assert_eq!(squares, vec![4, 16, 36]);
//! ```

mod heap;
mod logging;

pub mod boxed;
pub mod filter;
pub mod map;
pub mod or_throw;
pub mod quasi_sort;
pub mod sources;
pub mod take;
pub mod tap;
pub mod terminal;
pub mod top_k;

pub use boxed::BoxedExt;
pub use filter::{Filter, FilterExt};
pub use map::{Map, MapExt};
pub use or_throw::{OrThrow, OrThrowExt};
pub use quasi_sort::{NaturalOrder, QuasiSort, QuasiSortExt};
pub use sources::{
    empty, from_iter, from_producer, once, repeat_with, unfold, Empty, IntoFStream, IterStream,
    Once, ProducerStream, RepeatWith, Unfold,
};
pub use take::{Take, TakeExt};
pub use tap::{Tap, TapExt};
pub use terminal::TerminalExt;
pub use top_k::{TopK, TopKExt};
