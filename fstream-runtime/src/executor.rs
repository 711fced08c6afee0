// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::Result;
use std::sync::Arc;

/// A unit of background work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// An executor shared between an operator and the jobs it submits.
pub type SharedExecutor = Arc<dyn Executor>;

/// Runs jobs somewhere other than the calling thread.
///
/// Implementations must not run the job inline: operators submit jobs while
/// holding channel capacity and rely on the job making progress on its own.
pub trait Executor: Send + Sync {
    /// Schedules `job` for execution.
    ///
    /// # Errors
    ///
    /// Returns [`FStreamError::ExecutorShutdown`](fstream_core::FStreamError::ExecutorShutdown)
    /// if the executor no longer accepts work.
    fn execute(&self, job: Job) -> Result<()>;
}

impl<E> Executor for Arc<E>
where
    E: Executor + ?Sized,
{
    fn execute(&self, job: Job) -> Result<()> {
        (**self).execute(job)
    }
}

impl<E> Executor for &E
where
    E: Executor + ?Sized,
{
    fn execute(&self, job: Job) -> Result<()> {
        (**self).execute(job)
    }
}
