// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::executor::SharedExecutor;
use crate::parallelism::default_parallelism;
use crate::thread_pool::ThreadPool;
use fstream_core::Result;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable read by [`ParallelConfig::from_env`].
pub const WORKERS_ENV_VAR: &str = "FSTREAM_WORKERS";

const DEFAULT_CLOSE_GRACE: Duration = Duration::from_millis(100);
const DEFAULT_THREAD_NAME: &str = "fstream-worker";

/// Settings shared by every concurrency operator.
///
/// Without an explicit executor, each operator starts its own
/// [`ThreadPool`] of `workers` threads and shuts it down on close.
/// Operators sharing one executor must not pull from each other's output on
/// that executor's threads, or they can starve it.
///
/// # Example
///
/// ```
/// use fstream_runtime::ParallelConfig;
/// use std::time::Duration;
///
/// let config = ParallelConfig::new()
///     .with_workers(4)
///     .with_close_grace(Duration::from_millis(50))
///     .with_thread_name("resize");
///
/// assert_eq!(config.workers(), 4);
/// assert_eq!(config.thread_name(), "resize");
/// ```
#[derive(Clone)]
pub struct ParallelConfig {
    workers: usize,
    executor: Option<SharedExecutor>,
    close_grace: Duration,
    thread_name: String,
}

impl ParallelConfig {
    /// Same as [`Default::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings, with the worker count taken from `FSTREAM_WORKERS`
    /// when it holds a positive integer.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self::default();
        match env::var(WORKERS_ENV_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            Some(workers) if workers > 0 => config.with_workers(workers),
            _ => config,
        }
    }

    /// Sets the number of concurrent workers. Zero is promoted to one.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Runs the operator's jobs on `executor` instead of a private pool.
    #[must_use]
    pub fn with_executor(mut self, executor: SharedExecutor) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Runs the operator's jobs on [`ThreadPool::shared`].
    ///
    /// # Errors
    ///
    /// Fails if the shared pool cannot be created.
    pub fn with_shared_pool(self) -> Result<Self> {
        let pool: SharedExecutor = ThreadPool::shared()?;
        Ok(self.with_executor(pool))
    }

    /// How long `close()` waits for background threads to notice cancellation.
    #[must_use]
    pub fn with_close_grace(mut self, close_grace: Duration) -> Self {
        self.close_grace = close_grace;
        self
    }

    /// Prefix for the names of threads the operator starts.
    #[must_use]
    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn executor(&self) -> Option<&SharedExecutor> {
        self.executor.as_ref()
    }

    pub fn close_grace(&self) -> Duration {
        self.close_grace
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// The executor an operator should use, starting a private pool if none was configured.
    ///
    /// # Errors
    ///
    /// Fails if the private pool cannot be started.
    pub fn resolve(&self) -> Result<ResolvedExecutor> {
        match &self.executor {
            Some(executor) => Ok(ResolvedExecutor {
                executor: Arc::clone(executor),
                owned: None,
            }),
            None => {
                let pool = Arc::new(ThreadPool::with_name(self.workers, &self.thread_name)?);
                Ok(ResolvedExecutor {
                    executor: Arc::clone(&pool) as SharedExecutor,
                    owned: Some(pool),
                })
            }
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: default_parallelism(),
            executor: None,
            close_grace: DEFAULT_CLOSE_GRACE,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl fmt::Debug for ParallelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelConfig")
            .field("workers", &self.workers)
            .field("executor", &self.executor.as_ref().map(|_| "<executor>"))
            .field("close_grace", &self.close_grace)
            .field("thread_name", &self.thread_name)
            .finish()
    }
}

/// An executor plus the private pool backing it, if the operator owns one.
#[derive(Clone)]
pub struct ResolvedExecutor {
    executor: SharedExecutor,
    owned: Option<Arc<ThreadPool>>,
}

impl ResolvedExecutor {
    pub fn executor(&self) -> &SharedExecutor {
        &self.executor
    }

    /// Returns `true` if the pool was started for this operator alone.
    pub fn is_owned(&self) -> bool {
        self.owned.is_some()
    }

    /// Stops the private pool from taking new jobs. A shared executor is left alone.
    pub fn release(&self) {
        if let Some(pool) = &self.owned {
            pool.shutdown();
        }
    }
}

impl fmt::Debug for ResolvedExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedExecutor")
            .field("owned", &self.owned)
            .finish()
    }
}
