// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_runtime::{default_parallelism, spawn, NewThreadExecutor, ParallelConfig, SharedExecutor};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = ParallelConfig::default();

    assert_eq!(config.workers(), default_parallelism());
    assert!(config.executor().is_none());
    assert_eq!(config.close_grace(), Duration::from_millis(100));
    assert_eq!(config.thread_name(), "fstream-worker");
}

#[test]
fn test_default_parallelism_is_at_least_one() {
    assert!(default_parallelism() >= 1);
}

#[test]
fn test_zero_workers_is_promoted_to_one() {
    let config = ParallelConfig::new().with_workers(0);

    assert_eq!(config.workers(), 1);
}

#[test]
fn test_resolve_starts_private_pool_without_executor() -> anyhow::Result<()> {
    // Arrange
    let config = ParallelConfig::new().with_workers(2);

    // Act
    let resolved = config.resolve()?;

    // Assert
    assert!(resolved.is_owned());
    let value = spawn(resolved.executor().as_ref(), || 3)?.join().into_result()?;
    assert_eq!(value, 3);
    resolved.release();
    assert!(spawn(resolved.executor().as_ref(), || 3).is_err());
    Ok(())
}

#[test]
fn test_resolve_uses_configured_executor() -> anyhow::Result<()> {
    // Arrange
    let executor: SharedExecutor = Arc::new(NewThreadExecutor::new("custom"));
    let config = ParallelConfig::new().with_executor(Arc::clone(&executor));

    // Act
    let resolved = config.resolve()?;
    resolved.release();

    // Assert
    assert!(!resolved.is_owned());
    assert!(Arc::ptr_eq(resolved.executor(), &executor));
    assert_eq!(spawn(resolved.executor().as_ref(), || 1)?.join().ok(), Some(1));
    Ok(())
}

#[test]
fn test_with_shared_pool_sets_executor() -> anyhow::Result<()> {
    let config = ParallelConfig::new().with_shared_pool()?;

    assert!(config.executor().is_some());
    assert!(!config.resolve()?.is_owned());
    Ok(())
}
