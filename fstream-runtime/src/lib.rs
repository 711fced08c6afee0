// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Where fstream's background work runs.
//!
//! Concurrency operators never create threads directly. They submit [`Job`]s
//! to an [`Executor`]: either a fixed [`ThreadPool`] or a
//! [`NewThreadExecutor`] that dedicates one OS thread to every job. Results
//! come back through [`TaskHandle`]s, and panics inside jobs are reported as
//! [`FStreamError::WorkerPanic`](fstream_core::FStreamError::WorkerPanic)
//! instead of tearing down the worker.
//!
//! [`ParallelConfig`] bundles the knobs every operator takes: worker count,
//! executor, close grace period and thread names.

pub mod config;
pub mod executor;
mod logging;
pub mod new_thread;
pub mod parallelism;
pub mod task_handle;
pub mod thread_pool;

pub use config::{ParallelConfig, ResolvedExecutor, WORKERS_ENV_VAR};
pub use executor::{Executor, Job, SharedExecutor};
pub use new_thread::NewThreadExecutor;
pub use parallelism::default_parallelism;
pub use task_handle::{catch_panic, spawn, TaskHandle};
pub use thread_pool::ThreadPool;
