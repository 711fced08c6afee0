// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot results of jobs submitted to an [`Executor`].

use crate::executor::Executor;
use crate::logging::warning;
use fstream_core::{FStreamError, Result, StreamItem};
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

struct Slot<T> {
    outcome: Mutex<Option<StreamItem<T>>>,
    ready: Condvar,
}

impl<T> Slot<T> {
    fn complete(&self, item: StreamItem<T>) {
        let mut outcome = self.outcome.lock();
        if outcome.is_none() {
            *outcome = Some(item);
            self.ready.notify_all();
        }
    }
}

// Travels inside the job. If the executor drops the job without running it,
// the handle is released with `ExecutorShutdown` instead of waiting forever.
struct Completion<T> {
    slot: Arc<Slot<T>>,
}

impl<T> Drop for Completion<T> {
    fn drop(&mut self) {
        self.slot
            .complete(StreamItem::Error(FStreamError::ExecutorShutdown));
    }
}

/// The pending result of a job started with [`spawn`].
pub struct TaskHandle<T> {
    slot: Arc<Slot<T>>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the job finished and returns its outcome.
    ///
    /// A panic inside the job is returned as [`FStreamError::WorkerPanic`].
    pub fn join(self) -> StreamItem<T> {
        let mut outcome = self.slot.outcome.lock();
        loop {
            if let Some(item) = outcome.take() {
                return item;
            }
            self.slot.ready.wait(&mut outcome);
        }
    }

    /// Returns `true` once the outcome is available.
    pub fn is_finished(&self) -> bool {
        self.slot.outcome.lock().is_some()
    }
}

impl<T> fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Runs `f` on `executor` and returns a handle to its result.
///
/// # Errors
///
/// Fails if the executor rejects the job.
///
/// # Example
///
/// ```
/// use fstream_runtime::{spawn, NewThreadExecutor};
///
/// let executor = NewThreadExecutor::default();
/// let handle = spawn(&executor, || 6 * 7).unwrap();
/// assert_eq!(handle.join().ok(), Some(42));
/// ```
pub fn spawn<E, T, F>(executor: &E, f: F) -> Result<TaskHandle<T>>
where
    E: Executor + ?Sized,
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let slot = Arc::new(Slot {
        outcome: Mutex::new(None),
        ready: Condvar::new(),
    });
    let completion = Completion {
        slot: Arc::clone(&slot),
    };
    executor.execute(Box::new(move || {
        let item = catch_panic(f);
        completion.slot.complete(item);
    }))?;
    Ok(TaskHandle { slot })
}

/// Runs `f`, turning a panic into [`FStreamError::WorkerPanic`].
pub fn catch_panic<T, F>(f: F) -> StreamItem<T>
where
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => StreamItem::Value(value),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warning!("caught panic in worker: {}", message);
            StreamItem::Error(FStreamError::worker_panic(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
