// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, Result};

/// Stream over the items of an iterator. Created by [`from_iter`].
#[derive(Debug)]
pub struct IterStream<I> {
    iter: Option<I>,
}

impl<I> FStream for IterStream<I>
where
    I: Iterator + Send,
{
    type Item = I::Item;

    fn next(&mut self) -> Result<Option<I::Item>> {
        Ok(self.iter.as_mut().and_then(Iterator::next))
    }

    fn close(&mut self) {
        self.iter = None;
    }
}

/// Streams the items of `iter`.
///
/// ```
/// use fstream_core::FStream;
/// use fstream_stream::from_iter;
///
/// let mut stream = from_iter(vec!["a", "b"]);
/// assert_eq!(stream.next().unwrap(), Some("a"));
/// stream.close();
/// assert_eq!(stream.next().unwrap(), None);
/// ```
pub fn from_iter<I>(iter: I) -> IterStream<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: Send,
{
    IterStream {
        iter: Some(iter.into_iter()),
    }
}

/// Converts collections and iterators into an [`FStream`].
pub trait IntoFStream: IntoIterator + Sized {
    fn into_fstream(self) -> IterStream<Self::IntoIter>
    where
        Self::IntoIter: Send,
    {
        from_iter(self)
    }
}

impl<I: IntoIterator> IntoFStream for I {}
