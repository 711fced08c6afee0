// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, Received, Supplied, SuppliableStream};
use std::time::Duration;

#[test]
fn test_values_are_delivered_in_fifo_order() -> anyhow::Result<()> {
    // Arrange
    let mut channel = SuppliableStream::new(8);

    // Act
    for i in 0..5 {
        channel.supply(i)?;
    }
    channel.end_of_supply();

    // Assert
    let mut received = Vec::new();
    while let Some(v) = channel.next()? {
        received.push(v);
    }
    assert_eq!(received, vec![0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_zero_capacity_is_promoted_to_one() {
    let channel = SuppliableStream::<u8>::new(0);

    assert_eq!(channel.capacity(), 1);
}

#[test]
fn test_unbounded_supply_never_blocks() -> anyhow::Result<()> {
    let channel = SuppliableStream::unbounded();

    for i in 0..10_000 {
        channel.supply(i)?;
    }

    assert_eq!(channel.len(), 10_000);
    assert_eq!(channel.capacity(), usize::MAX);
    Ok(())
}

#[test]
fn test_poll_returns_none_when_nothing_buffered() -> anyhow::Result<()> {
    // Arrange
    let channel = SuppliableStream::<i32>::new(2);

    // Act & Assert
    assert_eq!(channel.poll()?, None);
    assert!(!channel.is_drained());

    channel.supply(7)?;
    assert_eq!(channel.poll()?, Some(7));

    channel.end_of_supply();
    assert_eq!(channel.poll()?, None);
    assert!(channel.is_drained());
    Ok(())
}

#[test]
fn test_next_timeout_reports_timeout_then_value_then_end() -> anyhow::Result<()> {
    // Arrange
    let channel = SuppliableStream::new(2);

    // Act & Assert
    assert_eq!(
        channel.next_timeout(Duration::from_millis(20))?,
        Received::TimedOut
    );

    channel.supply("a")?;
    assert_eq!(
        channel.next_timeout(Duration::from_millis(20))?,
        Received::Value("a")
    );

    channel.end_of_supply();
    assert_eq!(
        channel.next_timeout(Duration::from_millis(20))?,
        Received::Ended
    );
    Ok(())
}

#[test]
fn test_supply_timeout_hands_value_back_when_full() -> anyhow::Result<()> {
    // Arrange
    let channel = SuppliableStream::new(1);
    channel.supply(1)?;

    // Act
    let outcome = channel.supply_timeout(2, Duration::from_millis(20))?;

    // Assert
    assert_eq!(outcome, Supplied::TimedOut(2));
    assert_eq!(channel.len(), 1);
    Ok(())
}

#[test]
fn test_supply_timeout_accepts_when_room() -> anyhow::Result<()> {
    let channel = SuppliableStream::new(1);

    let outcome = channel.supply_timeout(1, Duration::from_millis(20))?;

    assert_eq!(outcome, Supplied::Accepted);
    Ok(())
}

#[test]
fn test_end_of_supply_is_idempotent() -> anyhow::Result<()> {
    let mut channel = SuppliableStream::<i32>::new(2);

    channel.end_of_supply();
    channel.end_of_supply();

    assert!(channel.is_ended());
    assert_eq!(channel.next()?, None);
    assert_eq!(channel.next()?, None);
    Ok(())
}

#[test]
fn test_close_clears_buffer_and_ends_stream() -> anyhow::Result<()> {
    // Arrange
    let mut channel = SuppliableStream::new(4);
    channel.supply(1)?;
    channel.supply(2)?;

    // Act
    channel.close();

    // Assert
    assert!(channel.is_closed());
    assert!(channel.is_empty());
    for _ in 0..3 {
        assert_eq!(channel.next()?, None);
    }
    Ok(())
}

#[test]
fn test_close_is_idempotent() -> anyhow::Result<()> {
    let mut channel = SuppliableStream::<i32>::new(1);

    channel.close();
    channel.close();
    channel.close_channel();

    assert_eq!(channel.next()?, None);
    Ok(())
}

#[test]
fn test_clones_share_the_same_buffer() -> anyhow::Result<()> {
    let producer = SuppliableStream::new(4);
    let mut consumer = producer.clone();

    producer.supply(42)?;
    producer.end_of_supply();

    assert_eq!(consumer.next()?, Some(42));
    assert_eq!(consumer.next()?, None);
    Ok(())
}

#[test]
fn test_unbounded_timeouts_behave_like_blocking_calls() -> anyhow::Result<()> {
    // Arrange
    let channel = SuppliableStream::new(1);

    // Act
    let supplied = channel.supply_timeout(7, Duration::MAX)?;
    let received = channel.next_timeout(Duration::MAX)?;
    channel.end_of_supply();
    let ended = channel.next_timeout(Duration::MAX)?;

    // Assert
    assert_eq!(supplied, Supplied::Accepted);
    assert_eq!(received, Received::Value(7));
    assert_eq!(ended, Received::Ended);
    Ok(())
}

#[test]
fn test_unbounded_next_timeout_waits_for_a_late_value() -> anyhow::Result<()> {
    // Arrange
    let channel = SuppliableStream::new(1);
    let producer = channel.clone();
    let feeder = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        producer.supply(3)
    });

    // Act
    let received = channel.next_timeout(Duration::MAX)?;

    // Assert
    assert_eq!(received, Received::Value(3));
    assert!(feeder.join().is_ok_and(|supplied| supplied.is_ok()));
    Ok(())
}
