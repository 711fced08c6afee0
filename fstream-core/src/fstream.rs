// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The pull-based stream contract shared by every source and operator.

use fstream_error::Result;

/// A stateful, single-consumer cursor over a (possibly infinite) sequence.
///
/// Every source and operator in fstream implements this trait, so operators
/// compose by owning their upstream stream(s) without special-casing.
///
/// # Contract
///
/// - `next()` returns `Ok(Some(item))` for a present value and `Ok(None)` once
///   the sequence is exhausted. `Err(_)` reports a terminal failure of the
///   stream (for example an error recorded on a bounded channel).
/// - `close()` releases resources. It is idempotent, and a composed stream must
///   forward it to every upstream it owns before returning.
/// - After `close()`, every call to `next()` returns `Ok(None)`.
///
/// # Example
///
/// ```
/// use fstream_core::{FStream, Result};
///
/// struct Countdown(u32);
///
/// impl FStream for Countdown {
///     type Item = u32;
///
///     fn next(&mut self) -> Result<Option<u32>> {
///         if self.0 == 0 {
///             return Ok(None);
///         }
///         self.0 -= 1;
///         Ok(Some(self.0))
///     }
///
///     fn close(&mut self) {
///         self.0 = 0;
///     }
/// }
///
/// let mut countdown = Countdown(2);
/// assert_eq!(countdown.next().unwrap(), Some(1));
/// countdown.close();
/// assert_eq!(countdown.next().unwrap(), None);
/// ```
pub trait FStream: Send {
    /// The type of the elements produced by the stream.
    type Item;

    /// Pulls the next element, blocking the calling thread if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the stream terminated with a failure.
    fn next(&mut self) -> Result<Option<Self::Item>>;

    /// Releases the stream and every upstream it owns.
    fn close(&mut self);
}

/// A heap-allocated, type-erased stream.
pub type BoxFStream<T> = Box<dyn FStream<Item = T> + 'static>;

impl<S> FStream for Box<S>
where
    S: FStream + ?Sized,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<Self::Item>> {
        (**self).next()
    }

    fn close(&mut self) {
        (**self).close();
    }
}

impl<S> FStream for &mut S
where
    S: FStream + ?Sized,
{
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<Self::Item>> {
        (**self).next()
    }

    fn close(&mut self) {
        (**self).close();
    }
}
