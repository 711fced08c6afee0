// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::FStream;
use fstream_stream::{BoxedExt, FilterExt, IntoFStream, MapExt, TakeExt, TapExt, TerminalExt};
use fstream_test_utils::test_data::mixed_sequence;
use fstream_test_utils::{DataVariant, TestData};

#[test]
fn test_filter_map_pipeline_on_fixtures() -> anyhow::Result<()> {
    // Arrange
    let stream = mixed_sequence().into_fstream();

    // Act
    let names = stream
        .filter(|d| d.variant() == DataVariant::Person)
        .map(|d| d.name().to_string())
        .collect_vec()?;

    // Assert
    assert_eq!(names, vec!["Alice", "Bob", "Charlie", "Diane"]);
    Ok(())
}

#[test]
fn test_take_limits_and_zero_take_is_empty() -> anyhow::Result<()> {
    assert_eq!((1..100).into_fstream().take(3).collect_vec()?, vec![1, 2, 3]);
    assert_eq!((1..100).into_fstream().take(0).count()?, 0);
    assert_eq!((1..3).into_fstream().take(10).count()?, 2);
    Ok(())
}

#[test]
fn test_tap_sees_every_item_unchanged() -> anyhow::Result<()> {
    // Arrange
    let mut seen: Vec<TestData> = Vec::new();

    // Act
    let passed = mixed_sequence()
        .into_fstream()
        .tap(|d| seen.push(d.clone()))
        .collect_vec()?;

    // Assert
    assert_eq!(passed, seen);
    Ok(())
}

#[test]
fn test_boxed_streams_compose() -> anyhow::Result<()> {
    let streams = vec![
        (0..2).into_fstream().boxed(),
        (10..12).into_fstream().map(|x| x + 1).boxed(),
    ];

    let mut all = Vec::new();
    for mut s in streams {
        while let Some(v) = s.next()? {
            all.push(v);
        }
    }

    assert_eq!(all, vec![0, 1, 11, 12]);
    Ok(())
}
