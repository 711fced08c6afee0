// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_runtime::{spawn, NewThreadExecutor};
use std::thread;

#[test]
fn test_each_job_gets_its_own_named_thread() -> anyhow::Result<()> {
    // Arrange
    let executor = NewThreadExecutor::new("harvester");

    // Act
    let first = spawn(&executor, || thread::current().name().map(str::to_string))?;
    let second = spawn(&executor, || thread::current().name().map(str::to_string))?;

    // Assert
    assert_eq!(first.join().into_result()?.as_deref(), Some("harvester-0"));
    assert_eq!(second.join().into_result()?.as_deref(), Some("harvester-1"));
    assert_eq!(executor.spawned(), 2);
    Ok(())
}

#[test]
fn test_jobs_do_not_run_on_the_caller_thread() -> anyhow::Result<()> {
    let executor = NewThreadExecutor::default();
    let caller = thread::current().id();

    let worker = spawn(&executor, || thread::current().id())?.join().into_result()?;

    assert_ne!(worker, caller);
    Ok(())
}
