// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Side-effect operator for debugging and troubleshooting pipelines.
//!
//! ```
//! use fstream_stream::{IntoFStream, MapExt, TapExt, TerminalExt};
//!
//! let mut seen = Vec::new();
//! let doubled = vec![1, 2, 3]
//!     .into_fstream()
//!     .tap(|x| seen.push(*x))
//!     .map(|x| x * 2)
//!     .collect_vec()
//!     .unwrap();
//!
//! assert_eq!(doubled, vec![2, 4, 6]);
//! assert_eq!(seen, vec![1, 2, 3]);
//! ```

use fstream_core::{FStream, Result};

/// Extension trait providing the [`tap`](Self::tap) operator.
pub trait TapExt: FStream + Sized {
    /// Calls `f` with a reference to every item, passing the item on unchanged.
    fn tap<F>(self, f: F) -> Tap<Self, F>
    where
        F: FnMut(&Self::Item) + Send,
    {
        Tap { upstream: self, f }
    }
}

impl<S: FStream> TapExt for S {}

/// Stream returned by [`TapExt::tap`].
pub struct Tap<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> FStream for Tap<S, F>
where
    S: FStream,
    F: FnMut(&S::Item) + Send,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>> {
        let item = self.upstream.next()?;
        if let Some(item) = &item {
            (self.f)(item);
        }
        Ok(item)
    }

    fn close(&mut self) {
        self.upstream.close();
    }
}
