// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::evaluate;
use crate::logging::{debug, trace};
use crate::shared_source::{SharedSource, Shutdown};
use fstream_core::{CancellationToken, FStream, FStreamError, Result, StreamItem, SuppliableStream};
use fstream_runtime::{catch_panic, Executor, ParallelConfig, ResolvedExecutor, SharedExecutor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Completion-order stream returned by
/// [`MapAsyncExt::map_async_unordered`](super::MapAsyncExt::map_async_unordered).
pub struct MapAsyncUnordered<U> {
    output: SuppliableStream<StreamItem<U>>,
    slots: Arc<dyn Shutdown>,
    executor: ResolvedExecutor,
    close_grace: Duration,
    closed: bool,
}

struct Slots<S, F, U> {
    source: SharedSource<S>,
    f: F,
    output: SuppliableStream<StreamItem<U>>,
    token: CancellationToken,
    executor: SharedExecutor,
    running: AtomicUsize,
}

impl<U: Send + 'static> MapAsyncUnordered<U> {
    pub(super) fn new<S, F, E>(upstream: S, config: &ParallelConfig, f: F) -> Result<Self>
    where
        S: FStream + 'static,
        S::Item: Send + 'static,
        E: Into<FStreamError>,
        F: Fn(S::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
    {
        let executor = config.resolve()?;
        let workers = config.workers();
        let output = SuppliableStream::new(workers);
        let slots = Arc::new(Slots {
            source: SharedSource::new(upstream),
            f,
            output: output.clone(),
            token: CancellationToken::new(),
            executor: Arc::clone(executor.executor()),
            running: AtomicUsize::new(workers),
        });

        let stream = Self {
            output,
            slots: Arc::clone(&slots) as Arc<dyn Shutdown>,
            executor,
            close_grace: config.close_grace(),
            closed: false,
        };
        for _ in 0..workers {
            Slots::resubmit(&slots)?;
        }
        debug!("map_async_unordered started {} slots", workers);
        Ok(stream)
    }
}

impl<S, F, U, E> Slots<S, F, U>
where
    S: FStream + 'static,
    S::Item: Send + 'static,
    U: Send + 'static,
    E: Into<FStreamError>,
    F: Fn(S::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
{
    fn resubmit(slots: &Arc<Self>) -> Result<()> {
        let slot = Arc::clone(slots);
        slots
            .executor
            .execute(Box::new(move || slot.run()))
            .inspect_err(|_| slots.finish_slot())
    }

    // One item per run; a slot that delivered its result schedules itself again.
    fn run(self: Arc<Self>) {
        let Some(item) = self.source.pull(&self.token) else {
            self.finish_slot();
            return;
        };
        let result = catch_panic(|| evaluate(&self.f, item)).and_then(|item| item);
        if self.output.supply(result).is_err() {
            trace!("map_async_unordered output closed, slot stops");
            self.finish_slot();
            return;
        }
        if let Err(e) = Self::resubmit(&self) {
            if !self.token.is_cancelled() {
                self.output.end_of_supply_with_error(e);
            }
        }
    }

    // The last slot to stop ends the output.
    fn finish_slot(&self) {
        if self.running.fetch_sub(1, Ordering::AcqRel) == 1 {
            match self.source.take_error() {
                Some(e) => self.output.end_of_supply_with_error(e),
                None => self.output.end_of_supply(),
            }
        }
    }
}

impl<S, F, U> Shutdown for Slots<S, F, U>
where
    S: FStream,
    F: Send + Sync,
    U: Send,
{
    fn shutdown(&self, grace: Duration) {
        self.token.cancel();
        self.output.close_channel();
        self.source.close_within(grace);
    }
}

impl<U: Send> FStream for MapAsyncUnordered<U> {
    type Item = StreamItem<U>;

    fn next(&mut self) -> Result<Option<StreamItem<U>>> {
        if self.closed {
            return Ok(None);
        }
        self.output.next()
    }

    fn close(&mut self) {
        self.shutdown();
    }
}

impl<U> MapAsyncUnordered<U> {
    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.slots.shutdown(self.close_grace);
        self.executor.release();
    }
}

impl<U> Drop for MapAsyncUnordered<U> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
