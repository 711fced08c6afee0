// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Streams that report how they are used.
//!
//! A [`StreamProbe`] is shared by any number of [`TrackedStream`]s. A tracked
//! stream becomes *active* on its first `next()` and stops being active when
//! it ends or is closed, whichever comes first. The probe records how many
//! streams were active at the same time, which is how tests check that an
//! operator never runs more sub-streams than its worker count.

use fstream_core::{FStream, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    nexts: AtomicUsize,
    closes: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    finished: AtomicUsize,
}

/// Shared counters for a family of [`TrackedStream`]s.
#[derive(Debug, Clone, Default)]
pub struct StreamProbe {
    counters: Arc<Counters>,
}

impl StreamProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `inner` so that it reports to this probe.
    pub fn track<S: FStream>(&self, inner: S) -> TrackedStream<S> {
        TrackedStream::new(inner, self)
    }

    /// Total `next()` calls across all tracked streams.
    pub fn nexts(&self) -> usize {
        self.counters.nexts.load(Ordering::SeqCst)
    }

    /// Total `close()` calls, repeated calls included.
    pub fn closes(&self) -> usize {
        self.counters.closes.load(Ordering::SeqCst)
    }

    /// Streams currently active.
    pub fn active(&self) -> usize {
        self.counters.active.load(Ordering::SeqCst)
    }

    /// Highest number of streams that were active at the same time.
    pub fn max_active(&self) -> usize {
        self.counters.max_active.load(Ordering::SeqCst)
    }

    /// Streams that ended or were closed.
    pub fn finished(&self) -> usize {
        self.counters.finished.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Active,
    Finished,
}

/// An [`FStream`] wrapper reporting to a [`StreamProbe`].
#[derive(Debug)]
pub struct TrackedStream<S> {
    inner: S,
    counters: Arc<Counters>,
    phase: Phase,
}

impl<S: FStream> TrackedStream<S> {
    pub fn new(inner: S, probe: &StreamProbe) -> Self {
        Self {
            inner,
            counters: Arc::clone(&probe.counters),
            phase: Phase::Idle,
        }
    }

    fn activate(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Active;
            let now = self.counters.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.counters.max_active.fetch_max(now, Ordering::SeqCst);
        }
    }

    fn finish(&mut self) {
        if self.phase != Phase::Finished {
            if self.phase == Phase::Active {
                self.counters.active.fetch_sub(1, Ordering::SeqCst);
            }
            self.phase = Phase::Finished;
            self.counters.finished.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl<S: FStream> FStream for TrackedStream<S> {
    type Item = S::Item;

    fn next(&mut self) -> Result<Option<S::Item>> {
        self.counters.nexts.fetch_add(1, Ordering::SeqCst);
        if self.phase == Phase::Finished {
            return self.inner.next();
        }
        self.activate();
        let item = self.inner.next();
        if !matches!(item, Ok(Some(_))) {
            self.finish();
        }
        item
    }

    fn close(&mut self) {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        self.finish();
        self.inner.close();
    }
}
