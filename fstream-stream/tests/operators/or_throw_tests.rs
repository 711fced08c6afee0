// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, FStreamError, StreamItem};
use fstream_stream::{IntoFStream, OrThrowExt, TerminalExt};
use fstream_test_utils::{assert_stream_ended, ErrorInjectingStream};

#[test]
fn test_or_throw_unwraps_values() -> anyhow::Result<()> {
    let items = vec![StreamItem::Value(1), StreamItem::Value(2)];

    let values = items.into_fstream().or_throw().collect_vec()?;

    assert_eq!(values, vec![1, 2]);
    Ok(())
}

#[test]
fn test_or_throw_raises_first_failure_then_ends() -> anyhow::Result<()> {
    // Arrange
    let mut stream = ErrorInjectingStream::new((10..15).into_fstream(), 1).or_throw();

    // Act & Assert
    assert_eq!(stream.next()?, Some(10));
    assert!(matches!(
        stream.next(),
        Err(FStreamError::StreamProcessingError { .. })
    ));
    assert_stream_ended!(stream);
    Ok(())
}
