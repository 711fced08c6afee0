// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Streams that fail on purpose.
//!
//! [`ErrorInjectingStream`] produces a per-item failure (`StreamItem::Error`)
//! and keeps going, the way a failed mapping shows up downstream.
//! [`FailingStream`] raises an error from `next()` itself, the way a channel
//! ended with an error does.

use fstream_core::{FStream, FStreamError, Result, StreamItem};

/// Wraps every value in `StreamItem::Value` and injects one `StreamItem::Error`
/// at the given position (0-indexed).
#[derive(Debug)]
pub struct ErrorInjectingStream<S> {
    inner: S,
    inject_error_at: Option<usize>,
    count: usize,
}

impl<S> ErrorInjectingStream<S> {
    pub fn new(inner: S, inject_error_at: usize) -> Self {
        Self {
            inner,
            inject_error_at: Some(inject_error_at),
            count: 0,
        }
    }
}

impl<S: FStream> FStream for ErrorInjectingStream<S> {
    type Item = StreamItem<S::Item>;

    fn next(&mut self) -> Result<Option<Self::Item>> {
        if self.inject_error_at == Some(self.count) {
            self.inject_error_at = None;
            self.count += 1;
            return Ok(Some(StreamItem::Error(FStreamError::stream_error(
                "Injected test error",
            ))));
        }
        let item = self.inner.next()?;
        if item.is_some() {
            self.count += 1;
        }
        Ok(item.map(StreamItem::Value))
    }

    fn close(&mut self) {
        self.inner.close();
    }
}

/// Passes through the first `fail_after` items, then raises an error from
/// `next()` once and ends.
#[derive(Debug)]
pub struct FailingStream<S> {
    inner: S,
    remaining: usize,
    failed: bool,
}

impl<S> FailingStream<S> {
    pub fn new(inner: S, fail_after: usize) -> Self {
        Self {
            inner,
            remaining: fail_after,
            failed: false,
        }
    }
}

impl<S: FStream> FStream for FailingStream<S> {
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>> {
        if self.failed {
            return Ok(None);
        }
        if self.remaining == 0 {
            self.failed = true;
            return Err(FStreamError::stream_error("Injected stream failure"));
        }
        self.remaining -= 1;
        self.inner.next()
    }

    fn close(&mut self) {
        self.failed = true;
        self.inner.close();
    }
}
