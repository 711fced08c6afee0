// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `k` greatest items of a stream.
//!
//! `top_k` drains the whole upstream when it is called, keeping a min-heap of
//! at most `k` items: memory is O(k), cost O(n log k). The upstream is closed
//! once drained, and the survivors are yielded greatest first.
//!
//! ```
//! use fstream_stream::{IntoFStream, TerminalExt, TopKExt};
//!
//! let podium = vec![7, 3, 9, 1, 8]
//!     .into_fstream()
//!     .top_k(3)
//!     .unwrap()
//!     .collect_vec()
//!     .unwrap();
//!
//! assert_eq!(podium, vec![9, 8, 7]);
//! ```

use crate::heap::ComparatorHeap;
use crate::logging::trace;
use fstream_core::{CloseGuard, FStream, Result};
use std::cmp::Ordering;
use std::vec;

/// Extension trait providing [`top_k`](Self::top_k) and [`top_k_by`](Self::top_k_by).
pub trait TopKExt: FStream + Sized {
    /// Keeps the `k` greatest items by their natural order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while draining the upstream.
    fn top_k(self, k: usize) -> Result<TopK<Self::Item>>
    where
        Self::Item: Ord + Send,
    {
        self.top_k_by(k, Ord::cmp)
    }

    /// Keeps the `k` greatest items under `cmp`. `k == 0` yields nothing.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while draining the upstream.
    fn top_k_by<C>(self, k: usize, cmp: C) -> Result<TopK<Self::Item>>
    where
        Self::Item: Send,
        C: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        let mut upstream = CloseGuard::new(self);
        let mut heap = ComparatorHeap::with_capacity(k.min(1024), cmp);
        let mut seen = 0usize;

        while let Some(item) = upstream.next()? {
            seen += 1;
            heap.offer(item, k);
        }

        trace!("top_k kept {} of {} items", heap.len(), seen);
        Ok(TopK {
            items: heap.into_sorted_desc().into_iter(),
        })
    }
}

impl<S: FStream> TopKExt for S {}

/// Stream returned by [`TopKExt::top_k_by`].
#[derive(Debug)]
pub struct TopK<T> {
    items: vec::IntoIter<T>,
}

impl<T: Send> FStream for TopK<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        Ok(self.items.next())
    }

    fn close(&mut self) {
        self.items = Vec::new().into_iter();
    }
}
