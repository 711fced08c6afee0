// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FStream;
use std::ops::{Deref, DerefMut};

/// Owns a stream and closes it when dropped.
///
/// Terminal operations hold their stream through a `CloseGuard`, so `close()`
/// runs exactly once whether consumption finishes, returns early, fails or
/// unwinds.
///
/// # Example
///
/// ```
/// use fstream_core::{CloseGuard, FStream, SuppliableStream};
///
/// let channel = SuppliableStream::<i32>::new(4);
/// {
///     let _guard = CloseGuard::new(channel.clone());
/// }
/// assert!(channel.is_closed());
/// ```
#[derive(Debug)]
pub struct CloseGuard<S: FStream> {
    stream: S,
}

impl<S: FStream> CloseGuard<S> {
    /// Takes ownership of `stream`.
    pub const fn new(stream: S) -> Self {
        Self { stream }
    }
}

impl<S: FStream> Deref for CloseGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.stream
    }
}

impl<S: FStream> DerefMut for CloseGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.stream
    }
}

impl<S: FStream> Drop for CloseGuard<S> {
    fn drop(&mut self) {
        self.stream.close();
    }
}
