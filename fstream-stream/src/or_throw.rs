// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turns per-item failures back into stream errors.
//!
//! Concurrent operators deliver `StreamItem<T>` so one failing item does not
//! stop the others. `or_throw` is for callers that treat any failure as fatal:
//! the first `StreamItem::Error` closes the upstream and is returned from
//! `next()`, after which the stream is ended.

use crate::logging::debug;
use fstream_core::{FStream, Result, StreamItem};

/// Extension trait providing the [`or_throw`](Self::or_throw) operator.
pub trait OrThrowExt<T>: FStream<Item = StreamItem<T>> + Sized {
    fn or_throw(self) -> OrThrow<Self> {
        OrThrow {
            upstream: self,
            closed: false,
        }
    }
}

impl<S, T> OrThrowExt<T> for S where S: FStream<Item = StreamItem<T>> {}

/// Stream returned by [`OrThrowExt::or_throw`].
pub struct OrThrow<S> {
    upstream: S,
    closed: bool,
}

impl<S, T> FStream for OrThrow<S>
where
    S: FStream<Item = StreamItem<T>>,
{
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        if self.closed {
            return Ok(None);
        }
        match self.upstream.next() {
            Ok(Some(StreamItem::Value(value))) => Ok(Some(value)),
            Ok(Some(StreamItem::Error(e))) | Err(e) => {
                debug!("or_throw raising item failure: {}", e);
                self.close();
                Err(e)
            }
            Ok(None) => Ok(None),
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.upstream.close();
        }
    }
}
