// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded, thread-safe channel that is also a stream.
//!
//! A [`SuppliableStream`] bridges producer threads and one stream consumer.
//! Producers call [`supply`](SuppliableStream::supply) and finally
//! [`end_of_supply`](SuppliableStream::end_of_supply); the consumer pulls with
//! [`FStream::next`].
//!
//! ## Characteristics
//!
//! - **Bounded**: at most `capacity` items are buffered; `supply` blocks while full.
//! - **FIFO**: items are delivered in the order they were accepted.
//! - **Terminal errors**: `end_of_supply_with_error` makes the consumer's next
//!   `next()` (after draining buffered items) fail with that error.
//! - **Fail fast**: supplying after `close()` or after end of supply is an error.
//! - **Cheap to clone**: all clones share the same buffer.
//!
//! All state lives behind one `parking_lot::Mutex` paired with one `Condvar`.
//!
//! ## Example
//!
//! ```
//! use fstream_core::{FStream, SuppliableStream};
//!
//! let mut channel = SuppliableStream::new(2);
//! let producer = channel.clone();
//!
//! let handle = std::thread::spawn(move || {
//!     for i in 0..5 {
//!         producer.supply(i).unwrap();
//!     }
//!     producer.end_of_supply();
//! });
//!
//! let mut received = Vec::new();
//! while let Some(v) = channel.next().unwrap() {
//!     received.push(v);
//! }
//! handle.join().unwrap();
//! assert_eq!(received, vec![0, 1, 2, 3, 4]);
//! ```

use crate::logging::trace;
use crate::FStream;
use fstream_error::{FStreamError, Result};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of [`SuppliableStream::supply_timeout`].
#[derive(Debug, PartialEq, Eq)]
pub enum Supplied<T> {
    /// The value was buffered.
    Accepted,
    /// The channel stayed full for the whole timeout; the value is handed back.
    TimedOut(T),
}

/// Outcome of [`SuppliableStream::next_timeout`].
#[derive(Debug, PartialEq, Eq)]
pub enum Received<T> {
    /// The oldest buffered value.
    Value(T),
    /// Supply ended (or the channel was closed) and the buffer is drained.
    Ended,
    /// Nothing arrived before the timeout.
    TimedOut,
}

struct State<T> {
    buffer: VecDeque<T>,
    ended: bool,
    error: Option<FStreamError>,
    closed: bool,
}

impl<T> State<T> {
    fn check_accepting(&self) -> Result<()> {
        if self.closed {
            Err(FStreamError::Closed)
        } else if self.ended {
            Err(FStreamError::SupplierEnded)
        } else {
            Ok(())
        }
    }

    /// Takes the next value, or reports the end of the channel.
    ///
    /// `None` means the consumer has to wait.
    fn take(&mut self) -> Option<Result<Received<T>>> {
        if self.closed {
            return Some(Ok(Received::Ended));
        }
        if let Some(value) = self.buffer.pop_front() {
            return Some(Ok(Received::Value(value)));
        }
        if self.ended {
            return Some(match self.error.take() {
                Some(error) => Err(error),
                None => Ok(Received::Ended),
            });
        }
        None
    }
}

struct Shared<T> {
    capacity: usize,
    state: Mutex<State<T>>,
    changed: Condvar,
}

impl<T> Shared<T> {
    // `false` once the deadline has passed. A deadline too far out to
    // represent (`None`) never expires.
    fn wait_until(
        &self,
        state: &mut MutexGuard<'_, State<T>>,
        deadline: Option<Instant>,
    ) -> bool {
        match deadline {
            Some(deadline) if Instant::now() >= deadline => false,
            Some(deadline) => {
                self.changed.wait_until(state, deadline);
                true
            }
            None => {
                self.changed.wait(state);
                true
            }
        }
    }
}

/// A bounded channel bridging producer threads and a single stream consumer.
///
/// See the [module documentation](self) for details.
pub struct SuppliableStream<T> {
    shared: Arc<Shared<T>>,
}

impl<T> SuppliableStream<T> {
    /// Creates an empty channel holding at most `capacity` items.
    ///
    /// A capacity of zero is promoted to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            shared: Arc::new(Shared {
                capacity,
                state: Mutex::new(State {
                    buffer: VecDeque::with_capacity(capacity.min(64)),
                    ended: false,
                    error: None,
                    closed: false,
                }),
                changed: Condvar::new(),
            }),
        }
    }

    /// Creates a channel whose `supply` never blocks.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Buffers `value`, blocking while the channel is full.
    ///
    /// # Errors
    ///
    /// - [`FStreamError::Closed`] if the consumer closed the channel.
    /// - [`FStreamError::SupplierEnded`] if `end_of_supply` was already called.
    pub fn supply(&self, value: T) -> Result<()> {
        let mut state = self.shared.state.lock();
        loop {
            state.check_accepting()?;
            if state.buffer.len() < self.shared.capacity {
                state.buffer.push_back(value);
                self.shared.changed.notify_all();
                return Ok(());
            }
            self.shared.changed.wait(&mut state);
        }
    }

    /// Buffers `value`, blocking at most `timeout` while the channel is full.
    ///
    /// # Errors
    ///
    /// Same as [`supply`](Self::supply).
    pub fn supply_timeout(&self, value: T, timeout: Duration) -> Result<Supplied<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.shared.state.lock();
        loop {
            state.check_accepting()?;
            if state.buffer.len() < self.shared.capacity {
                state.buffer.push_back(value);
                self.shared.changed.notify_all();
                return Ok(Supplied::Accepted);
            }
            if !self.shared.wait_until(&mut state, deadline) {
                return Ok(Supplied::TimedOut(value));
            }
        }
    }

    /// Pulls the oldest value, blocking at most `timeout` while the channel is empty.
    ///
    /// # Errors
    ///
    /// Returns the terminal error recorded by `end_of_supply_with_error` once
    /// the buffered values are drained.
    pub fn next_timeout(&self, timeout: Duration) -> Result<Received<T>> {
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.shared.state.lock();
        loop {
            if let Some(outcome) = state.take() {
                return self.delivered(state, outcome);
            }
            if !self.shared.wait_until(&mut state, deadline) {
                return Ok(Received::TimedOut);
            }
        }
    }

    /// Pulls the oldest value like [`FStream::next`], but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// - [`FStreamError::Timeout`] if nothing arrived in time. It is
    ///   recoverable: the channel is untouched and the call can be retried.
    /// - The recorded terminal error once the buffer is drained.
    pub fn next_within(&self, timeout: Duration) -> Result<Option<T>> {
        match self.next_timeout(timeout)? {
            Received::Value(value) => Ok(Some(value)),
            Received::Ended => Ok(None),
            Received::TimedOut => Err(FStreamError::timeout("suppliable stream next", timeout)),
        }
    }

    /// Pulls the oldest value without blocking.
    ///
    /// Returns `Ok(None)` both when nothing is buffered yet and when the
    /// channel has ended; use [`is_drained`](Self::is_drained) to tell them apart.
    ///
    /// # Errors
    ///
    /// Returns the recorded terminal error once the buffer is drained.
    pub fn poll(&self) -> Result<Option<T>> {
        let mut state = self.shared.state.lock();
        match state.take() {
            Some(outcome) => match self.delivered(state, outcome)? {
                Received::Value(value) => Ok(Some(value)),
                Received::Ended | Received::TimedOut => Ok(None),
            },
            None => Ok(None),
        }
    }

    fn recv(&self) -> Result<Option<T>> {
        let mut state = self.shared.state.lock();
        loop {
            if let Some(outcome) = state.take() {
                return match self.delivered(state, outcome)? {
                    Received::Value(value) => Ok(Some(value)),
                    Received::Ended | Received::TimedOut => Ok(None),
                };
            }
            self.shared.changed.wait(&mut state);
        }
    }

    // A slot was freed: wake producers blocked on a full buffer.
    fn delivered(
        &self,
        state: MutexGuard<'_, State<T>>,
        outcome: Result<Received<T>>,
    ) -> Result<Received<T>> {
        if matches!(outcome, Ok(Received::Value(_))) {
            self.shared.changed.notify_all();
        }
        drop(state);
        outcome
    }

    /// Signals that no more values will be supplied.
    ///
    /// Idempotent; the first call (with or without error) wins.
    pub fn end_of_supply(&self) {
        self.finish(None);
    }

    /// Signals the end of supply with a terminal error for the consumer.
    ///
    /// Ignored if supply already ended.
    pub fn end_of_supply_with_error(&self, error: FStreamError) {
        self.finish(Some(error));
    }

    fn finish(&self, error: Option<FStreamError>) {
        let mut state = self.shared.state.lock();
        if state.ended {
            return;
        }
        if let Some(error) = &error {
            trace!("suppliable stream ended with error: {}", error);
        }
        state.ended = true;
        state.error = error;
        self.shared.changed.notify_all();
    }

    /// Closes the channel: drops buffered values and wakes every waiter.
    ///
    /// Later `supply` calls fail with [`FStreamError::Closed`] and `next`
    /// returns `Ok(None)`. Idempotent.
    pub fn close_channel(&self) {
        let dropped = {
            let mut state = self.shared.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            state.error = None;
            self.shared.changed.notify_all();
            std::mem::take(&mut state.buffer)
        };
        // values are dropped outside the lock
        drop(dropped);
    }

    /// Maximum number of buffered items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Number of currently buffered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.state.lock().buffer.len()
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once `end_of_supply` was called.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.shared.state.lock().ended
    }

    /// Returns `true` once the channel was closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Returns `true` if no value will ever be delivered again.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        let state = self.shared.state.lock();
        state.closed || (state.ended && state.buffer.is_empty() && state.error.is_none())
    }
}

impl<T> Clone for SuppliableStream<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for SuppliableStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("SuppliableStream")
            .field("capacity", &self.shared.capacity)
            .field("buffered", &state.buffer.len())
            .field("ended", &state.ended)
            .field("closed", &state.closed)
            .finish()
    }
}

impl<T: Send> FStream for SuppliableStream<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        self.recv()
    }

    fn close(&mut self) {
        self.close_channel();
    }
}
