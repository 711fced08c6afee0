// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Read-ahead buffering on a background thread.
//!
//! The buffer is refilled by at most one task at a time. Whenever the
//! consumer pulls while fewer than half of the buffer's slots are taken and
//! no task is running, a task is started that pulls the source until the
//! buffer is full or the source ends.

use crate::logging::{debug, trace};
use crate::shared_source::SharedSource;
use fstream_core::{CancellationToken, FStream, Result, SuppliableStream};
use fstream_runtime::{Executor, NewThreadExecutor, SharedExecutor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const CLOSE_GRACE: Duration = Duration::from_millis(100);

/// Extension trait providing the [`prefetch`](Self::prefetch) operator.
pub trait PrefetchExt: FStream + Sized + 'static {
    /// Reads up to `buffer_size` items ahead of the consumer. Each refill
    /// runs on a new thread.
    ///
    /// A `buffer_size` of zero is promoted to one.
    ///
    /// ```
    /// use fstream_exec::PrefetchExt;
    /// use fstream_stream::{IntoFStream, TerminalExt};
    ///
    /// let items = (0..10).into_fstream().prefetch(4).collect_vec().unwrap();
    /// assert_eq!(items, (0..10).collect::<Vec<_>>());
    /// ```
    fn prefetch(self, buffer_size: usize) -> Prefetch<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        let executor: SharedExecutor = Arc::new(NewThreadExecutor::new("fstream-prefetch"));
        self.prefetch_with(buffer_size, executor)
    }

    /// [`prefetch`](Self::prefetch) with refills running on `executor`.
    fn prefetch_with(self, buffer_size: usize, executor: SharedExecutor) -> Prefetch<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        let buffer = SuppliableStream::new(buffer_size);
        Prefetch {
            refill: Arc::new(Refill {
                source: SharedSource::new(self),
                buffer: buffer.clone(),
                running: AtomicBool::new(false),
                token: CancellationToken::new(),
            }),
            buffer,
            executor,
            closed: false,
        }
    }
}

impl<S: FStream + 'static> PrefetchExt for S {}

/// Stream returned by [`PrefetchExt::prefetch`].
pub struct Prefetch<T> {
    refill: Arc<dyn Refilling>,
    buffer: SuppliableStream<T>,
    executor: SharedExecutor,
    closed: bool,
}

trait Refilling: Send + Sync {
    /// Claims the refill flag if a refill is due.
    fn claim(&self) -> bool;

    fn run(self: Arc<Self>);

    /// Gives the flag back after the task could not be started.
    fn unclaim(&self);

    fn shutdown(&self);
}

struct Refill<S, T> {
    source: SharedSource<S>,
    buffer: SuppliableStream<T>,
    running: AtomicBool,
    token: CancellationToken,
}

impl<S, T> Refill<S, T>
where
    S: FStream<Item = T>,
    T: Send,
{
    fn is_due(&self) -> bool {
        !self.token.is_cancelled()
            && !self.buffer.is_ended()
            && self.buffer.len() * 2 < self.buffer.capacity()
    }

    fn fill(&self) {
        while !self.token.is_cancelled() && self.buffer.len() < self.buffer.capacity() {
            let Some(item) = self.source.pull(&self.token) else {
                match self.source.take_error() {
                    Some(e) => self.buffer.end_of_supply_with_error(e),
                    None => self.buffer.end_of_supply(),
                }
                return;
            };
            // only this task supplies, so a slot is free
            if self.buffer.supply(item).is_err() {
                return;
            }
        }
    }
}

impl<S, T> Refilling for Refill<S, T>
where
    S: FStream<Item = T> + 'static,
    T: Send + 'static,
{
    fn claim(&self) -> bool {
        self.is_due()
            && self
                .running
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
    }

    fn run(self: Arc<Self>) {
        loop {
            self.fill();
            self.running.store(false, Ordering::Release);
            // the consumer may have checked the flag while it was still set
            if !self.claim() {
                break;
            }
            trace!("prefetch refill continues");
        }
    }

    fn unclaim(&self) {
        self.running.store(false, Ordering::Release);
    }

    fn shutdown(&self) {
        self.token.cancel();
        self.buffer.close_channel();
        self.source.close_within(CLOSE_GRACE);
    }
}

impl<T: Send> Prefetch<T> {
    fn start_refill(&self) -> Result<()> {
        if !self.refill.claim() {
            return Ok(());
        }
        let refill = Arc::clone(&self.refill);
        self.executor
            .execute(Box::new(move || refill.run()))
            .inspect_err(|_| self.refill.unclaim())
    }
}

impl<T: Send> FStream for Prefetch<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        if self.closed {
            return Ok(None);
        }
        if let Err(e) = self.start_refill() {
            debug!("prefetch could not start a refill: {}", e);
            self.close();
            return Err(e);
        }
        self.buffer.next()
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.refill.shutdown();
        }
    }
}

impl<T> Drop for Prefetch<T> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            self.refill.shutdown();
        }
    }
}
