// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, Result};

/// Extension trait providing the [`map`](Self::map) operator.
pub trait MapExt: FStream + Sized {
    /// Applies `f` to every item on the consumer thread.
    ///
    /// For mapping on worker threads see `map_async` in `fstream-exec`.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item) -> U + Send,
    {
        Map { upstream: self, f }
    }
}

impl<S: FStream> MapExt for S {}

/// Stream returned by [`MapExt::map`].
pub struct Map<S, F> {
    upstream: S,
    f: F,
}

impl<S, U, F> FStream for Map<S, F>
where
    S: FStream,
    F: FnMut(S::Item) -> U + Send,
{
    type Item = U;

    fn next(&mut self) -> Result<Option<U>> {
        Ok(self.upstream.next()?.map(&mut self.f))
    }

    fn close(&mut self) {
        self.upstream.close();
    }
}
