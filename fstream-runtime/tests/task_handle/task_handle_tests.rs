// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStreamError, StreamItem};
use fstream_runtime::{catch_panic, spawn, Executor, Job, ThreadPool};
use std::thread;
use std::time::Duration;

/// Accepts jobs and drops them without running them.
struct DroppingExecutor;

impl Executor for DroppingExecutor {
    fn execute(&self, job: Job) -> fstream_core::Result<()> {
        drop(job);
        Ok(())
    }
}

#[test]
fn test_join_waits_for_result() -> anyhow::Result<()> {
    // Arrange
    let pool = ThreadPool::new(1)?;

    // Act
    let handle = spawn(&pool, || {
        thread::sleep(Duration::from_millis(30));
        "slow"
    })?;

    // Assert
    assert!(!handle.is_finished());
    assert_eq!(handle.join().ok(), Some("slow"));
    Ok(())
}

#[test]
fn test_is_finished_after_completion() -> anyhow::Result<()> {
    let pool = ThreadPool::new(1)?;
    let handle = spawn(&pool, || 1)?;

    while !handle.is_finished() {
        thread::sleep(Duration::from_millis(1));
    }

    assert_eq!(handle.join().ok(), Some(1));
    Ok(())
}

#[test]
fn test_dropped_job_releases_handle_with_shutdown_error() -> anyhow::Result<()> {
    // Arrange
    let executor = DroppingExecutor;

    // Act
    let handle = spawn(&executor, || 1)?;

    // Assert
    assert!(matches!(
        handle.join().err(),
        Some(FStreamError::ExecutorShutdown)
    ));
    Ok(())
}

#[test]
fn test_spawn_on_shut_down_pool_fails() -> anyhow::Result<()> {
    let pool = ThreadPool::new(1)?;
    pool.shutdown();

    let result = spawn(&pool, || 1);

    assert!(matches!(result, Err(FStreamError::ExecutorShutdown)));
    Ok(())
}

#[test]
fn test_catch_panic_reports_message() {
    let item: StreamItem<()> = catch_panic(|| panic!("exploded at {}", 3));

    let err = item.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(err.contains("exploded at 3"), "{err}");
}

#[test]
fn test_catch_panic_passes_values_through() {
    assert_eq!(catch_panic(|| 9), StreamItem::Value(9));
}
