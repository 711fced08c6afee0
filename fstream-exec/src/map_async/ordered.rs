// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::evaluate;
use crate::logging::{debug, trace};
use fstream_core::{FStream, FStreamError, Result, StreamItem};
use fstream_runtime::{spawn, ParallelConfig, ResolvedExecutor, TaskHandle};
use std::collections::VecDeque;
use std::sync::Arc;

/// Order-preserving stream returned by
/// [`MapAsyncExt::map_async`](super::MapAsyncExt::map_async).
///
/// The upstream is pulled on the consumer thread; only the mapping runs on
/// workers. Pending tasks are kept in input order and the oldest one is
/// always joined first.
pub struct MapAsync<S: FStream, F, U> {
    upstream: S,
    f: Arc<F>,
    executor: ResolvedExecutor,
    pending: VecDeque<TaskHandle<StreamItem<U>>>,
    workers: usize,
    upstream_done: bool,
    upstream_error: Option<FStreamError>,
    closed: bool,
}

impl<S, F, U, E> MapAsync<S, F, U>
where
    S: FStream,
    S::Item: Send + 'static,
    U: Send + 'static,
    E: Into<FStreamError>,
    F: Fn(S::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
{
    pub(super) fn new(upstream: S, config: &ParallelConfig, f: F) -> Result<Self> {
        let mut stream = Self {
            upstream,
            f: Arc::new(f),
            executor: config.resolve()?,
            pending: VecDeque::with_capacity(config.workers()),
            workers: config.workers(),
            upstream_done: false,
            upstream_error: None,
            closed: false,
        };
        stream.fill()?;
        debug!("map_async started {} tasks", stream.pending.len());
        Ok(stream)
    }

    // Returns `false` once the upstream has nothing more to launch.
    fn launch_next(&mut self) -> Result<bool> {
        if self.upstream_done {
            return Ok(false);
        }
        match self.upstream.next() {
            Ok(Some(item)) => {
                let f = Arc::clone(&self.f);
                let handle = spawn(self.executor.executor(), move || evaluate(&*f, item))?;
                self.pending.push_back(handle);
                Ok(true)
            }
            Ok(None) => {
                self.upstream_done = true;
                Ok(false)
            }
            Err(e) => {
                self.upstream_done = true;
                self.upstream_error = Some(e);
                Ok(false)
            }
        }
    }

    fn fill(&mut self) -> Result<()> {
        while self.pending.len() < self.workers && self.launch_next()? {}
        Ok(())
    }
}

impl<S, F, U, E> FStream for MapAsync<S, F, U>
where
    S: FStream,
    S::Item: Send + 'static,
    U: Send + 'static,
    E: Into<FStreamError>,
    F: Fn(S::Item) -> std::result::Result<U, E> + Send + Sync + 'static,
{
    type Item = StreamItem<U>;

    fn next(&mut self) -> Result<Option<StreamItem<U>>> {
        if self.closed {
            return Ok(None);
        }
        let Some(oldest) = self.pending.pop_front() else {
            return match self.upstream_error.take() {
                Some(e) => Err(e),
                None => Ok(None),
            };
        };
        let item = oldest.join().and_then(|item| item);
        if let Err(e) = self.fill() {
            trace!("map_async could not start a replacement task: {}", e);
            self.upstream_done = true;
            self.upstream_error = Some(e);
        }
        Ok(Some(item))
    }

    fn close(&mut self) {
        self.shutdown();
    }
}

impl<S: FStream, F, U> MapAsync<S, F, U> {
    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // running tasks finish on their own, their results are discarded
        self.pending.clear();
        self.upstream.close();
        self.executor.release();
    }
}

impl<S: FStream, F, U> Drop for MapAsync<S, F, U> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
