// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::FStream;
use fstream_stream::{from_iter, IntoFStream, TerminalExt};
use fstream_test_utils::assert_stream_ended;
use fstream_test_utils::test_data::{mixed_sequence, person_alice};

#[test]
fn test_from_iter_yields_in_order() -> anyhow::Result<()> {
    let stream = from_iter(mixed_sequence());

    let result = stream.collect_vec()?;

    assert_eq!(result, mixed_sequence());
    Ok(())
}

#[test]
fn test_into_fstream_on_ranges() -> anyhow::Result<()> {
    assert_eq!((0..4).into_fstream().collect_vec()?, vec![0, 1, 2, 3]);
    Ok(())
}

#[test]
fn test_close_ends_iter_stream() -> anyhow::Result<()> {
    // Arrange
    let mut stream = vec![person_alice(); 3].into_fstream();

    // Act
    assert!(stream.next()?.is_some());
    stream.close();

    // Assert
    assert_stream_ended!(stream);
    Ok(())
}
