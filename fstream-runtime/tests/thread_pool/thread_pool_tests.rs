// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::FStreamError;
use fstream_runtime::{spawn, Executor, ThreadPool};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_pool_runs_every_submitted_job() -> anyhow::Result<()> {
    // Arrange
    let pool = ThreadPool::new(3)?;
    let counter = Arc::new(AtomicUsize::new(0));

    // Act
    for _ in 0..100 {
        let counter = Arc::clone(&counter);
        pool.execute(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))?;
    }
    pool.join();

    // Assert
    assert_eq!(counter.load(Ordering::SeqCst), 100);
    Ok(())
}

#[test]
fn test_pool_threads_are_named() -> anyhow::Result<()> {
    // Arrange
    let pool = ThreadPool::with_name(2, "resizer")?;
    let names = Arc::new(Mutex::new(HashSet::new()));

    // Act
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let names = Arc::clone(&names);
            spawn(&pool, move || {
                thread::sleep(Duration::from_millis(5));
                let name = thread::current().name().map(str::to_string);
                names.lock().insert(name);
            })
        })
        .collect::<Result<_, _>>()?;
    for handle in handles {
        handle.join().into_result()?;
    }

    // Assert
    let names = names.lock();
    assert!(!names.is_empty());
    assert!(names
        .iter()
        .all(|n| n.as_deref().is_some_and(|n| n.starts_with("resizer-"))));
    Ok(())
}

#[test]
fn test_at_most_size_jobs_run_concurrently() -> anyhow::Result<()> {
    // Arrange
    let pool = ThreadPool::new(2)?;
    let running = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    // Act
    let handles: Vec<_> = (0..10)
        .map(|_| {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            spawn(&pool, move || {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(10));
                running.fetch_sub(1, Ordering::SeqCst);
            })
        })
        .collect::<Result<_, _>>()?;
    for handle in handles {
        handle.join().into_result()?;
    }

    // Assert
    assert!(peak.load(Ordering::SeqCst) <= 2);
    Ok(())
}

#[test]
fn test_execute_after_shutdown_is_rejected() -> anyhow::Result<()> {
    let pool = ThreadPool::new(1)?;

    pool.shutdown();
    let result = pool.execute(Box::new(|| {}));

    assert!(pool.is_shutdown());
    assert!(matches!(result, Err(FStreamError::ExecutorShutdown)));
    Ok(())
}

#[test]
fn test_queued_jobs_still_run_after_shutdown() -> anyhow::Result<()> {
    // Arrange
    let pool = ThreadPool::new(1)?;
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..5 {
        let counter = Arc::clone(&counter);
        pool.execute(Box::new(move || {
            thread::sleep(Duration::from_millis(2));
            counter.fetch_add(1, Ordering::SeqCst);
        }))?;
    }

    // Act
    pool.shutdown();
    pool.join();

    // Assert
    assert_eq!(counter.load(Ordering::SeqCst), 5);
    Ok(())
}

#[test]
fn test_panicking_job_does_not_kill_worker() -> anyhow::Result<()> {
    // Arrange
    let pool = ThreadPool::new(1)?;

    // Act
    let failed = spawn(&pool, || -> u32 { panic!("bad job") })?;
    let succeeded = spawn(&pool, || 5u32)?;

    // Assert
    assert!(matches!(
        failed.join().err(),
        Some(FStreamError::WorkerPanic { .. })
    ));
    assert_eq!(succeeded.join().ok(), Some(5));
    Ok(())
}

#[test]
fn test_zero_size_is_promoted_to_one() -> anyhow::Result<()> {
    let pool = ThreadPool::new(0)?;

    assert_eq!(pool.size(), 1);
    assert_eq!(spawn(&pool, || "ran")?.join().ok(), Some("ran"));
    Ok(())
}

#[test]
fn test_shared_pool_is_a_singleton() -> anyhow::Result<()> {
    let a = ThreadPool::shared()?;
    let b = ThreadPool::shared()?;

    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.size() >= 1);
    Ok(())
}

#[test]
fn test_dropping_pool_from_its_own_worker_does_not_deadlock() -> anyhow::Result<()> {
    // Arrange
    let pool = Arc::new(ThreadPool::new(2)?);
    let inside = Arc::clone(&pool);

    // Act
    let handle = spawn(pool.as_ref(), move || {
        thread::sleep(Duration::from_millis(20));
        drop(inside);
        "done"
    })?;
    drop(pool);

    // Assert
    assert_eq!(handle.join().ok(), Some("done"));
    Ok(())
}

#[test]
fn test_dropping_pool_does_not_wait_for_busy_workers() -> anyhow::Result<()> {
    // Arrange
    let pool = ThreadPool::new(1)?;
    let finished = Arc::new(AtomicUsize::new(0));
    let handle = spawn(&pool, {
        let finished = Arc::clone(&finished);
        move || {
            thread::sleep(Duration::from_millis(300));
            finished.fetch_add(1, Ordering::SeqCst);
            "slow"
        }
    })?;
    thread::sleep(Duration::from_millis(20));

    // Act
    let started = Instant::now();
    drop(pool);
    let elapsed = started.elapsed();

    // Assert
    assert!(elapsed < Duration::from_millis(150), "drop took {elapsed:?}");
    assert_eq!(finished.load(Ordering::SeqCst), 0);
    assert_eq!(handle.join().ok(), Some("slow"));
    assert_eq!(finished.load(Ordering::SeqCst), 1);
    Ok(())
}
