// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operations that consume a stream.
//!
//! Every operation takes the stream by value and holds it in a
//! [`CloseGuard`], so `close()` runs exactly once on completion, on an error
//! from `next()`, on an early return and during unwinding.

use fstream_core::{CloseGuard, FStream, Result};

/// Extension trait providing the terminal operations.
pub trait TerminalExt: FStream + Sized {
    /// Collects every item into a `Vec`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the stream.
    fn collect_vec(self) -> Result<Vec<Self::Item>> {
        self.fold(Vec::new(), |mut items, item| {
            items.push(item);
            items
        })
    }

    /// Calls `f` for every item.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the stream.
    fn for_each<F>(self, mut f: F) -> Result<()>
    where
        F: FnMut(Self::Item),
    {
        self.fold((), |(), item| f(item))
    }

    /// Counts the items.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the stream.
    fn count(self) -> Result<usize> {
        self.fold(0, |n, _| n + 1)
    }

    /// Folds every item into an accumulator.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the stream.
    fn fold<B, F>(self, init: B, mut f: F) -> Result<B>
    where
        F: FnMut(B, Self::Item) -> B,
    {
        let mut stream = CloseGuard::new(self);
        let mut acc = init;
        while let Some(item) = stream.next()? {
            acc = f(acc, item);
        }
        Ok(acc)
    }
}

impl<S: FStream> TerminalExt for S {}
