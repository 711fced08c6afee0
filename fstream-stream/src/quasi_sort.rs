// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded-lookahead approximate sorting.
//!
//! `quasi_sort(window)` keeps up to `window + 1` items in a min-heap. Every
//! `next()` refills the heap from the upstream until it holds more than
//! `window` items (or the upstream ends) and then yields the smallest one.
//! An input whose items are never more than `window` positions away from
//! their sorted position comes out fully sorted; any other input comes out
//! "more sorted". Memory stays O(window) however long the stream is.
//!
//! ```
//! use fstream_stream::{IntoFStream, QuasiSortExt, TerminalExt};
//!
//! let sorted = vec![2, 1, 3, 5, 4, 6]
//!     .into_fstream()
//!     .quasi_sort(1)
//!     .collect_vec()
//!     .unwrap();
//!
//! assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
//! ```

use crate::heap::ComparatorHeap;
use fstream_core::{FStream, Result};
use std::cmp::Ordering;

/// Comparator used by [`QuasiSortExt::quasi_sort`].
pub type NaturalOrder<T> = fn(&T, &T) -> Ordering;

/// Extension trait providing [`quasi_sort`](Self::quasi_sort) and
/// [`quasi_sort_by`](Self::quasi_sort_by).
pub trait QuasiSortExt: FStream + Sized {
    /// Approximately sorts using the natural order, looking `window` items ahead.
    fn quasi_sort(self, window: usize) -> QuasiSort<Self, NaturalOrder<Self::Item>>
    where
        Self::Item: Ord + Send,
    {
        self.quasi_sort_by(window, Ord::cmp as NaturalOrder<Self::Item>)
    }

    /// Approximately sorts by `cmp`, looking `window` items ahead.
    fn quasi_sort_by<C>(self, window: usize, cmp: C) -> QuasiSort<Self, C>
    where
        Self::Item: Send,
        C: FnMut(&Self::Item, &Self::Item) -> Ordering + Send,
    {
        QuasiSort {
            upstream: self,
            heap: ComparatorHeap::with_capacity(window.saturating_add(1).min(1024), cmp),
            window,
            exhausted: false,
            closed: false,
        }
    }
}

impl<S: FStream> QuasiSortExt for S {}

/// Stream returned by [`QuasiSortExt::quasi_sort_by`].
pub struct QuasiSort<S: FStream, C> {
    upstream: S,
    heap: ComparatorHeap<S::Item, C>,
    window: usize,
    exhausted: bool,
    closed: bool,
}

impl<S, C> FStream for QuasiSort<S, C>
where
    S: FStream,
    S::Item: Send,
    C: FnMut(&S::Item, &S::Item) -> Ordering + Send,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>> {
        if self.closed {
            return Ok(None);
        }
        while !self.exhausted && self.heap.len() <= self.window {
            match self.upstream.next()? {
                Some(item) => self.heap.push(item),
                None => self.exhausted = true,
            }
        }
        Ok(self.heap.pop())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.heap.clear();
            self.upstream.close();
        }
    }
}
