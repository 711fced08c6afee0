// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, Result};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Delay {
    Fixed(Duration),
    Jitter { max_ms: u64 },
}

/// Sleeps before handing out each item of `inner`.
#[derive(Debug)]
pub struct DelayedStream<S> {
    inner: S,
    delay: Delay,
}

impl<S> DelayedStream<S> {
    /// Waits `delay` before every item.
    pub fn new(inner: S, delay: Duration) -> Self {
        Self {
            inner,
            delay: Delay::Fixed(delay),
        }
    }

    /// Waits a random `0..=max_ms` milliseconds before every item.
    pub fn with_jitter(inner: S, max_ms: u64) -> Self {
        Self {
            inner,
            delay: Delay::Jitter { max_ms },
        }
    }
}

impl<S: FStream> FStream for DelayedStream<S> {
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>> {
        let pause = match self.delay {
            Delay::Fixed(d) => d,
            Delay::Jitter { max_ms } => Duration::from_millis(fastrand::u64(0..=max_ms)),
        };
        thread::sleep(pause);
        self.inner.next()
    }

    fn close(&mut self) {
        self.inner.close();
    }
}
