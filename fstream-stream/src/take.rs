// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Limits a stream to its first `n` items.
//!
//! Reaching the limit closes the upstream right away, so background workers
//! feeding it stop before the consumer gets around to calling `close()`.

use fstream_core::{FStream, Result};

/// Extension trait providing the [`take`](Self::take) operator.
pub trait TakeExt: FStream + Sized {
    /// Yields at most `n` items, then ends.
    fn take(self, n: usize) -> Take<Self> {
        let mut take = Take {
            upstream: self,
            remaining: n,
            closed: false,
        };
        if n == 0 {
            take.close();
        }
        take
    }
}

impl<S: FStream> TakeExt for S {}

/// Stream returned by [`TakeExt::take`].
pub struct Take<S> {
    upstream: S,
    remaining: usize,
    closed: bool,
}

impl<S: FStream> FStream for Take<S> {
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>> {
        if self.closed {
            return Ok(None);
        }
        let item = self.upstream.next()?;
        if item.is_some() {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.close();
            }
        }
        Ok(item)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.upstream.close();
        }
    }
}
