// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixed-size pool of named worker threads.
//!
//! Workers share one unbounded [`SuppliableStream`] of jobs. Shutting down
//! ends the supply: queued jobs still run, then each worker sees the end of
//! the queue and exits. Dropping a pool shuts it down and detaches its
//! workers; only [`ThreadPool::join`] waits for them.

use crate::executor::{Executor, Job};
use crate::logging::{debug, trace};
use crate::parallelism::default_parallelism;
use crate::task_handle::catch_panic;
use fstream_core::{FStream, FStreamError, Result, ResultExt, SuppliableStream};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};

/// A fixed set of worker threads executing [`Job`]s in submission order.
///
/// # Example
///
/// ```
/// use fstream_runtime::{spawn, ThreadPool};
///
/// let pool = ThreadPool::new(2).unwrap();
/// let handles: Vec<_> = (0..4)
///     .map(|i| spawn(&pool, move || i * 10).unwrap())
///     .collect();
/// let results: Vec<_> = handles.into_iter().filter_map(|h| h.join().ok()).collect();
/// assert_eq!(results, vec![0, 10, 20, 30]);
/// ```
pub struct ThreadPool {
    queue: SuppliableStream<Job>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

impl ThreadPool {
    /// Starts `size` workers named `fstream-worker-{n}`.
    ///
    /// # Errors
    ///
    /// Fails if a worker thread cannot be spawned.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_name(size, "fstream-worker")
    }

    /// Starts `size` workers named `"{name}-{n}"`. A size of zero is promoted to one.
    ///
    /// # Errors
    ///
    /// Fails if a worker thread cannot be spawned.
    pub fn with_name(size: usize, name: &str) -> Result<Self> {
        let size = size.max(1);
        let queue = SuppliableStream::<Job>::unbounded();
        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            let spawned = thread::Builder::new()
                .name(format!("{name}-{id}"))
                .spawn({
                    let queue = queue.clone();
                    move || run_worker(id, queue)
                })
                .map_err(FStreamError::user_error)
                .with_context(|| format!("failed to spawn worker {id}"));
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    queue.end_of_supply();
                    return Err(e);
                }
            }
        }

        debug!("thread pool '{}' started with {} workers", name, size);
        Ok(Self {
            queue,
            workers: Mutex::new(workers),
            size,
        })
    }

    /// Process-wide pool sized by [`default_parallelism`], created on first use.
    ///
    /// # Errors
    ///
    /// Fails if the pool cannot be created.
    pub fn shared() -> Result<Arc<ThreadPool>> {
        static SHARED: OnceLock<Arc<ThreadPool>> = OnceLock::new();
        if let Some(pool) = SHARED.get() {
            return Ok(Arc::clone(pool));
        }
        let pool = Arc::new(ThreadPool::with_name(
            default_parallelism(),
            "fstream-shared",
        )?);
        // a concurrent initializer may have won; its pool is the one kept
        Ok(Arc::clone(SHARED.get_or_init(|| pool)))
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of submitted jobs not yet picked up by a worker.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Stops accepting jobs. Already queued jobs still run. Does not block.
    pub fn shutdown(&self) {
        if !self.queue.is_ended() {
            debug!("thread pool shutting down");
        }
        self.queue.end_of_supply();
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) was called.
    pub fn is_shutdown(&self) -> bool {
        self.queue.is_ended()
    }

    /// Shuts down and waits for every worker to exit.
    ///
    /// Called from one of the pool's own workers, that worker is skipped.
    pub fn join(&self) {
        self.shutdown();
        let workers = std::mem::take(&mut *self.workers.lock());
        let current = thread::current().id();
        for handle in workers {
            if handle.thread().id() != current {
                let _ = handle.join();
            }
        }
    }
}

fn run_worker(id: usize, mut queue: SuppliableStream<Job>) {
    trace!("worker {} started", id);
    while let Ok(Some(job)) = queue.next() {
        // a panicking job must not take the worker down with it
        let _ = catch_panic(job);
    }
    trace!("worker {} exiting", id);
}

impl Executor for ThreadPool {
    fn execute(&self, job: Job) -> Result<()> {
        self.queue
            .supply(job)
            .map_err(|_| FStreamError::ExecutorShutdown)
    }
}

impl fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadPool")
            .field("size", &self.size)
            .field("queued", &self.queued())
            .field("shutdown", &self.is_shutdown())
            .finish()
    }
}

// Detaches the workers: a running job may block indefinitely.
impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
        self.workers.get_mut().clear();
    }
}
