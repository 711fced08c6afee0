// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the fstream workspace.
//!
//! - [`TrackedStream`] and [`StreamProbe`]: observe how operators pull and close their upstreams
//! - [`ErrorInjectingStream`] and [`FailingStream`]: per-item failures and terminal stream errors
//! - [`DelayedStream`]: fixed or random per-item latency
//! - [`test_data`]: person/animal/plant fixtures
//! - [`helpers`]: timing helpers and [`assert_stream_ended!`]

pub mod delayed;
pub mod error_injection;
pub mod helpers;
pub mod test_data;
pub mod tracked;

use fstream_core::SuppliableStream;

#[doc(hidden)]
pub use fstream_core as __core;

pub use delayed::DelayedStream;
pub use error_injection::{ErrorInjectingStream, FailingStream};
pub use helpers::{sleep_ms, split_items};
pub use test_data::{Animal, DataVariant, Person, Plant, TestData};
pub use tracked::{StreamProbe, TrackedStream};

/// A bounded channel as a (producer, consumer) pair of handles.
///
/// ```
/// use fstream_core::FStream;
/// use fstream_test_utils::test_channel;
///
/// let (tx, mut rx) = test_channel(4);
/// tx.supply(1).unwrap();
/// tx.end_of_supply();
/// assert_eq!(rx.next().unwrap(), Some(1));
/// assert_eq!(rx.next().unwrap(), None);
/// ```
pub fn test_channel<T>(capacity: usize) -> (SuppliableStream<T>, SuppliableStream<T>) {
    let channel = SuppliableStream::new(capacity);
    (channel.clone(), channel)
}
