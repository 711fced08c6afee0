// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::FStream;
use fstream_exec::{Group, GroupDynamicExt};
use fstream_stream::{IntoFStream, TerminalExt};
use fstream_test_utils::test_data::mixed_sequence;
use fstream_test_utils::{assert_stream_ended, DataVariant, FailingStream, StreamProbe, TestData};
use std::thread;

#[test]
fn test_groups_reconstruct_the_input() -> anyhow::Result<()> {
    // Arrange
    let mut groups = (0..30).into_fstream().group_dynamic(|x: &i32| x % 3);

    // Act
    let mut opened: Vec<Group<i32, i32>> = Vec::new();
    while let Some(group) = groups.next()? {
        opened.push(group);
    }
    let mut contents = Vec::new();
    for group in opened {
        let key = *group.key();
        contents.push((key, group.collect_vec()?));
    }

    // Assert
    assert_eq!(
        contents.iter().map(|(key, _)| *key).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    for (key, items) in &contents {
        assert!(items.iter().all(|x| x % 3 == *key));
        assert!(items.windows(2).all(|w| w[0] < w[1]));
    }
    let mut all: Vec<i32> = contents.into_iter().flat_map(|(_, items)| items).collect();
    all.sort_unstable();
    assert_eq!(all, (0..30).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn test_groups_appear_in_first_seen_order() -> anyhow::Result<()> {
    // Arrange
    let mut groups = mixed_sequence()
        .into_fstream()
        .group_dynamic(TestData::variant);

    // Act
    let mut opened = Vec::new();
    while let Some(group) = groups.next()? {
        opened.push(group);
    }

    // Assert
    let keys: Vec<DataVariant> = opened.iter().map(|g| *g.key()).collect();
    assert_eq!(
        keys,
        vec![DataVariant::Person, DataVariant::Animal, DataVariant::Plant]
    );
    let people = opened.remove(0).collect_vec()?;
    let names: Vec<&str> = people.iter().map(TestData::name).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Charlie", "Diane"]);
    Ok(())
}

#[test]
fn test_groups_consumed_on_separate_threads() -> anyhow::Result<()> {
    // Arrange
    let mut groups = (0..400).into_fstream().group_dynamic(|x: &u32| x % 4);

    // Act
    let mut workers = Vec::new();
    while let Some(group) = groups.next()? {
        workers.push(thread::spawn(move || {
            let key = *group.key();
            (key, group.collect_vec())
        }));
    }
    let mut per_key = Vec::new();
    for worker in workers {
        let (key, items) = worker.join().map_err(|_| anyhow::anyhow!("group thread panicked"))?;
        per_key.push((key, items?));
    }

    // Assert
    assert_eq!(per_key.len(), 4);
    for (key, items) in per_key {
        assert_eq!(items.len(), 100);
        assert!(items.iter().all(|x| x % 4 == key));
        assert!(items.windows(2).all(|w| w[0] < w[1]));
    }
    Ok(())
}

#[test]
fn test_closed_group_is_replaced_when_key_reappears() -> anyhow::Result<()> {
    // Arrange
    let mut groups = vec![1, 2, 3, 4, 5].into_fstream().group_dynamic(|x: &i32| x % 2);
    let mut odd = groups.next()?.ok_or_else(|| anyhow::anyhow!("no first group"))?;
    assert_eq!(odd.next()?, Some(1));

    // Act
    odd.close();
    let even = groups.next()?.ok_or_else(|| anyhow::anyhow!("no even group"))?;
    let mut odd_again = groups.next()?.ok_or_else(|| anyhow::anyhow!("no new odd group"))?;

    // Assert
    assert_stream_ended!(odd);
    assert_eq!(*even.key(), 0);
    assert_eq!(*odd_again.key(), 1);
    assert_eq!(odd_again.next()?, Some(3));
    assert_eq!(odd_again.next()?, Some(5));
    assert_eq!(even.collect_vec()?, vec![2, 4]);
    assert_stream_ended!(odd_again);
    Ok(())
}

#[test]
fn test_upstream_error_reaches_outer_stream_and_every_group() -> anyhow::Result<()> {
    // Arrange
    let mut groups = FailingStream::new((0..10).into_fstream(), 4).group_dynamic(|x: &i32| x % 2);
    let mut evens = groups.next()?.ok_or_else(|| anyhow::anyhow!("no even group"))?;
    let mut odds = groups.next()?.ok_or_else(|| anyhow::anyhow!("no odd group"))?;

    // Act
    let outer_result = groups.next();

    // Assert
    assert!(outer_result.is_err());
    assert_eq!(evens.next()?, Some(0));
    assert_eq!(evens.next()?, Some(2));
    assert!(evens.next().is_err());
    assert_eq!(odds.next()?, Some(1));
    assert_eq!(odds.next()?, Some(3));
    assert!(odds.next().is_err());
    assert_stream_ended!(odds);
    assert_stream_ended!(groups);
    Ok(())
}

#[test]
fn test_closing_outer_stream_ends_groups_after_buffered_items() -> anyhow::Result<()> {
    // Arrange
    let probe = StreamProbe::new();
    let mut groups = probe.track((0..).into_fstream()).group_dynamic(|x: &u64| x % 2);
    let mut evens = groups.next()?.ok_or_else(|| anyhow::anyhow!("no even group"))?;
    let mut odds = groups.next()?.ok_or_else(|| anyhow::anyhow!("no odd group"))?;

    // Act
    groups.close();

    // Assert
    assert_eq!(probe.finished(), 1);
    assert_eq!(evens.next()?, Some(0));
    assert_stream_ended!(evens);
    assert_eq!(odds.next()?, Some(1));
    assert_stream_ended!(odds);
    assert_stream_ended!(groups);
    Ok(())
}

#[test]
fn test_empty_upstream_has_no_groups() -> anyhow::Result<()> {
    let mut groups = Vec::<String>::new()
        .into_fstream()
        .group_dynamic(|s: &String| s.len());

    assert_stream_ended!(groups);
    Ok(())
}
