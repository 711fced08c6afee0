// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::executor::{Executor, Job};
use crate::logging::trace;
use fstream_core::{FStreamError, Result, ResultExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Runs every job on a freshly spawned, detached OS thread.
///
/// Used where each job must own a thread for its whole life, such as merge
/// harvesters that block on their sub-stream.
#[derive(Debug)]
pub struct NewThreadExecutor {
    name: String,
    spawned: AtomicUsize,
}

impl NewThreadExecutor {
    /// Threads are named `"{name}-{n}"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spawned: AtomicUsize::new(0),
        }
    }

    /// Number of threads spawned so far.
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::Relaxed)
    }
}

impl Default for NewThreadExecutor {
    fn default() -> Self {
        Self::new("fstream-thread")
    }
}

impl Executor for NewThreadExecutor {
    fn execute(&self, job: Job) -> Result<()> {
        let n = self.spawned.fetch_add(1, Ordering::Relaxed);
        let name = format!("{}-{n}", self.name);
        trace!("spawning thread {}", name);
        thread::Builder::new()
            .name(name)
            .spawn(job)
            .map(drop)
            .map_err(FStreamError::user_error)
            .context("failed to spawn thread")
    }
}
