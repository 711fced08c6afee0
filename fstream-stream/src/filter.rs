// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, Result};

/// Extension trait providing the [`filter`](Self::filter) operator.
pub trait FilterExt: FStream + Sized {
    /// Keeps only the items for which `predicate` returns `true`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool + Send,
    {
        Filter {
            upstream: self,
            predicate,
        }
    }
}

impl<S: FStream> FilterExt for S {}

/// Stream returned by [`FilterExt::filter`].
pub struct Filter<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> FStream for Filter<S, P>
where
    S: FStream,
    P: FnMut(&S::Item) -> bool + Send,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>> {
        while let Some(item) = self.upstream.next()? {
            if (self.predicate)(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn close(&mut self) {
        self.upstream.close();
    }
}
