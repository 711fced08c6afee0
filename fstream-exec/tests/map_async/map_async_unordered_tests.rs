// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, FStreamError};
use fstream_exec::MapAsyncExt;
use fstream_runtime::ParallelConfig;
use fstream_stream::{IntoFStream, OrThrowExt, TerminalExt};
use fstream_test_utils::{assert_stream_ended, sleep_ms, split_items, FailingStream, StreamProbe};
use std::time::{Duration, Instant};

fn config(workers: usize) -> ParallelConfig {
    ParallelConfig::new().with_workers(workers)
}

#[test]
fn test_every_item_is_mapped_exactly_once() -> anyhow::Result<()> {
    // Arrange
    let stream = (0..200)
        .into_fstream()
        .map_async_unordered(&config(4), |x: i32| Ok::<_, FStreamError>(x * 2))?;

    // Act
    let mut results = stream.or_throw().collect_vec()?;
    results.sort_unstable();

    // Assert
    assert_eq!(results, (0..200).map(|x| x * 2).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_fast_items_overtake_slow_ones() -> anyhow::Result<()> {
    // Arrange
    let stream = (0..4).into_fstream().map_async_unordered(&config(2), |x: u64| {
        if x == 0 {
            sleep_ms(150);
        }
        Ok::<_, FStreamError>(x)
    })?;

    // Act
    let results = stream.or_throw().collect_vec()?;

    // Assert
    assert_eq!(results.len(), 4);
    assert_eq!(results.last(), Some(&0));
    Ok(())
}

#[test]
fn test_failures_do_not_stop_other_items() -> anyhow::Result<()> {
    // Arrange
    let stream = (0..10).into_fstream().map_async_unordered(&config(3), |x: i32| {
        if x % 4 == 0 {
            Err(FStreamError::stream_error(format!("rejected {x}")))
        } else {
            Ok(x)
        }
    })?;

    // Act
    let (mut values, errors) = split_items(stream.collect_vec()?);
    values.sort_unstable();

    // Assert
    assert_eq!(values, vec![1, 2, 3, 5, 6, 7, 9]);
    assert_eq!(errors.len(), 3);
    Ok(())
}

#[test]
fn test_upstream_error_ends_output_after_all_results() -> anyhow::Result<()> {
    // Arrange
    let mut stream = FailingStream::new((0..100).into_fstream(), 5)
        .map_async_unordered(&config(3), |x: i32| {
            sleep_ms(5);
            Ok::<_, FStreamError>(x)
        })?;

    // Act
    let mut values = Vec::new();
    let error = loop {
        match stream.next() {
            Ok(Some(item)) => values.push(item.unwrap()),
            Ok(None) => break None,
            Err(e) => break Some(e),
        }
    };
    values.sort_unstable();

    // Assert
    assert_eq!(values, vec![0, 1, 2, 3, 4]);
    assert!(error.is_some());
    assert_stream_ended!(stream);
    Ok(())
}

#[test]
fn test_close_stops_workers_and_closes_upstream() -> anyhow::Result<()> {
    // Arrange
    let probe = StreamProbe::new();
    let mut stream = probe
        .track((0..).into_fstream())
        .map_async_unordered(&config(2), |x: u64| Ok::<_, FStreamError>(x))?;

    // Act
    for _ in 0..3 {
        assert!(stream.next()?.is_some());
    }
    stream.close();

    // Assert
    assert_eq!(probe.finished(), 1);
    assert_stream_ended!(stream);
    Ok(())
}

#[test]
fn test_single_worker_still_completes() -> anyhow::Result<()> {
    let results = vec!["a", "b", "c"]
        .into_fstream()
        .map_async_unordered(&config(1), |s: &str| Ok::<_, FStreamError>(s.to_uppercase()))?
        .or_throw()
        .collect_vec()?;

    // one worker processes items one at a time, in order
    assert_eq!(results, vec!["A", "B", "C"]);
    Ok(())
}

#[test]
fn test_random_latencies_lose_nothing() -> anyhow::Result<()> {
    // Arrange
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let delays: Vec<u64> = (0..60).map(|_| rng.u64(0..4)).collect();
    let expected: u64 = delays.iter().sum();

    // Act
    let total = delays
        .into_fstream()
        .map_async_unordered(&config(5), |delay: u64| {
            sleep_ms(delay);
            Ok::<_, FStreamError>(delay)
        })?
        .or_throw()
        .fold(0, |acc, delay| acc + delay)?;

    // Assert
    assert_eq!(total, expected);
    Ok(())
}

#[test]
fn test_drop_does_not_wait_for_running_mappers() -> anyhow::Result<()> {
    // Arrange
    let mut stream = (0u64..4).into_fstream().map_async_unordered(&config(2), |x| {
        sleep_ms(500);
        Ok::<_, FStreamError>(x)
    })?;
    sleep_ms(20);

    // Act
    let started = Instant::now();
    stream.close();
    drop(stream);
    let elapsed = started.elapsed();

    // Assert
    assert!(elapsed < Duration::from_millis(250), "close and drop took {elapsed:?}");
    Ok(())
}
