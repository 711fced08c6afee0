// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent draining of a stream of streams.
//!
//! `merge_parallel` runs up to `workers` harvesters. A harvester takes the
//! next sub-stream from the generator, forwards every element into one
//! shared channel, closes the sub-stream and then takes the next one. Taking
//! a sub-stream happens under the generator's lock, so at most `workers`
//! sub-streams are ever open and none is opened twice.
//!
//! Elements of one sub-stream keep their relative order; elements of
//! different sub-streams interleave arbitrarily. A failing sub-stream
//! contributes one `StreamItem::Error` and is abandoned. A failing generator
//! ends the output with its error once the running harvesters are done.

use crate::logging::{debug, trace};
use crate::shared_source::{SharedSource, Shutdown};
use event_listener::{Event, Listener};
use fstream_core::{CancellationToken, FStream, Result, StreamItem, SuppliableStream};
use fstream_runtime::{catch_panic, Executor, ParallelConfig, ResolvedExecutor};
use fstream_stream::{from_iter, IterStream};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Extension trait providing the [`merge_parallel`](Self::merge_parallel) operator.
pub trait MergeParallelExt: FStream + Sized + 'static {
    /// Merges the sub-streams produced by this stream, draining up to
    /// `config.workers()` of them at once.
    ///
    /// # Errors
    ///
    /// Fails if the worker pool cannot be started or rejects the harvesters.
    fn merge_parallel<T>(self, config: &ParallelConfig) -> Result<MergeParallel<T>>
    where
        Self::Item: FStream<Item = T> + 'static,
        T: Send + 'static,
    {
        MergeParallel::new(self, config)
    }
}

impl<G: FStream + 'static> MergeParallelExt for G {}

/// Merges a fixed collection of streams with [`merge_parallel`](MergeParallelExt::merge_parallel).
///
/// # Errors
///
/// Same as [`merge_parallel`](MergeParallelExt::merge_parallel).
///
/// ```
/// use fstream_exec::merge_parallel_all;
/// use fstream_runtime::ParallelConfig;
/// use fstream_stream::{from_iter, OrThrowExt, TerminalExt};
///
/// let streams = vec![from_iter(vec![1, 2]), from_iter(vec![3]), from_iter(vec![4, 5])];
/// let mut merged = merge_parallel_all(streams, &ParallelConfig::new().with_workers(2))
///     .unwrap()
///     .or_throw()
///     .collect_vec()
///     .unwrap();
///
/// merged.sort_unstable();
/// assert_eq!(merged, vec![1, 2, 3, 4, 5]);
/// ```
pub fn merge_parallel_all<I, S>(
    streams: I,
    config: &ParallelConfig,
) -> Result<MergeParallel<S::Item>>
where
    I: IntoIterator<Item = S>,
    I::IntoIter: Send + 'static,
    S: FStream + 'static,
    S::Item: Send + 'static,
{
    let generator: IterStream<I::IntoIter> = from_iter(streams);
    generator.merge_parallel(config)
}

/// Stream returned by [`MergeParallelExt::merge_parallel`].
pub struct MergeParallel<T> {
    output: SuppliableStream<StreamItem<T>>,
    harvest: Arc<dyn Shutdown>,
    executor: ResolvedExecutor,
    close_grace: Duration,
    closed: bool,
}

struct Harvest<G, T> {
    generator: SharedSource<G>,
    output: SuppliableStream<StreamItem<T>>,
    token: CancellationToken,
    running: Mutex<usize>,
    idle: Event,
}

impl<T: Send + 'static> MergeParallel<T> {
    fn new<G>(generator: G, config: &ParallelConfig) -> Result<Self>
    where
        G: FStream + 'static,
        G::Item: FStream<Item = T> + 'static,
    {
        let executor = config.resolve()?;
        let workers = config.workers();
        let output = SuppliableStream::new(workers);
        let harvest = Arc::new(Harvest {
            generator: SharedSource::new(generator),
            output: output.clone(),
            token: CancellationToken::new(),
            running: Mutex::new(workers),
            idle: Event::new(),
        });

        let stream = Self {
            output,
            harvest: Arc::clone(&harvest) as Arc<dyn Shutdown>,
            executor,
            close_grace: config.close_grace(),
            closed: false,
        };
        for submitted in 0..workers {
            let slot = Arc::clone(&harvest);
            if let Err(e) = stream.executor.executor().execute(Box::new(move || slot.run())) {
                for _ in submitted..workers {
                    harvest.finish_slot();
                }
                return Err(e);
            }
        }
        debug!("merge_parallel started {} harvesters", workers);
        Ok(stream)
    }
}

impl<G, T> Harvest<G, T>
where
    G: FStream,
    G::Item: FStream<Item = T>,
    T: Send,
{
    fn run(self: Arc<Self>) {
        while let Some(sub) = self.generator.pull(&self.token) {
            self.drain(sub);
        }
        self.finish_slot();
    }

    fn drain(&self, mut sub: G::Item) {
        let outcome = catch_panic(|| loop {
            if self.token.is_cancelled() {
                break;
            }
            match sub.next() {
                Ok(Some(value)) => {
                    if self.output.supply(StreamItem::Value(value)).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    trace!("merge_parallel sub-stream failed: {}", e);
                    let _ = self.output.supply(StreamItem::Error(e));
                    break;
                }
            }
        });
        if let StreamItem::Error(e) = outcome {
            let _ = self.output.supply(StreamItem::Error(e));
        }
        sub.close();
    }

    fn finish_slot(&self) {
        let last = {
            let mut running = self.running.lock();
            *running -= 1;
            *running == 0
        };
        if last {
            match self.generator.take_error() {
                Some(e) => self.output.end_of_supply_with_error(e),
                None => self.output.end_of_supply(),
            }
            self.idle.notify(usize::MAX);
        }
    }
}

impl<G, T> Harvest<G, T> {
    fn wait_idle(&self, grace: Duration) -> bool {
        let deadline = Instant::now().checked_add(grace);
        loop {
            if *self.running.lock() == 0 {
                return true;
            }
            let listener = self.idle.listen();
            // the last harvester may have finished before listen()
            if *self.running.lock() == 0 {
                return true;
            }
            match deadline {
                Some(deadline) => {
                    if listener.wait_deadline(deadline).is_none() {
                        return *self.running.lock() == 0;
                    }
                }
                None => listener.wait(),
            }
        }
    }
}

impl<G, T> Shutdown for Harvest<G, T>
where
    G: FStream,
    T: Send,
{
    fn shutdown(&self, grace: Duration) {
        self.token.cancel();
        self.output.close_channel();
        if !self.wait_idle(grace) {
            debug!("merge_parallel closed with harvesters still running");
        }
        self.generator.close_within(Duration::ZERO);
    }
}

impl<T: Send> FStream for MergeParallel<T> {
    type Item = StreamItem<T>;

    fn next(&mut self) -> Result<Option<StreamItem<T>>> {
        if self.closed {
            return Ok(None);
        }
        self.output.next()
    }

    fn close(&mut self) {
        self.shutdown();
    }
}

impl<T> MergeParallel<T> {
    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.harvest.shutdown(self.close_grace);
        self.executor.release();
    }
}

impl<T> Drop for MergeParallel<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
