// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStreamError, StreamItem};
use std::thread;
use std::time::Duration;

pub fn sleep_ms(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}

/// Separates values from failures, keeping the order of each.
pub fn split_items<T>(items: Vec<StreamItem<T>>) -> (Vec<T>, Vec<FStreamError>) {
    let mut values = Vec::new();
    let mut errors = Vec::new();
    for item in items {
        match item {
            StreamItem::Value(v) => values.push(v),
            StreamItem::Error(e) => errors.push(e),
        }
    }
    (values, errors)
}

/// Asserts that a stream is ended: `next()` returns `Ok(None)`, repeatedly.
///
/// ```
/// use fstream_core::FStream;
/// use fstream_test_utils::{assert_stream_ended, test_channel};
///
/// let (tx, mut rx) = test_channel::<u8>(1);
/// tx.end_of_supply();
/// assert_stream_ended!(rx);
/// ```
#[macro_export]
macro_rules! assert_stream_ended {
    ($stream:expr) => {
        $crate::assert_stream_ended!($stream, 3)
    };
    ($stream:expr, $times:expr) => {
        for _ in 0..$times {
            match $crate::__core::FStream::next(&mut $stream) {
                Ok(None) => {}
                Ok(Some(_)) => panic!("expected the stream to be ended, got an item"),
                Err(e) => panic!("expected the stream to be ended, got error: {e}"),
            }
        }
    };
}
