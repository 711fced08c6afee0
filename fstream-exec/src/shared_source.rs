// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::trace;
use fstream_core::{CancellationToken, FStream, FStreamError};
use parking_lot::Mutex;
use std::time::Duration;

/// An upstream pulled by several worker threads, one pull at a time.
pub(crate) struct SharedSource<S> {
    state: Mutex<SourceState<S>>,
}

struct SourceState<S> {
    stream: S,
    finished: bool,
    closed: bool,
    error: Option<FStreamError>,
}

impl<S: FStream> SourceState<S> {
    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.finished = true;
            self.stream.close();
        }
    }
}

impl<S: FStream> SharedSource<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self {
            state: Mutex::new(SourceState {
                stream,
                finished: false,
                closed: false,
                error: None,
            }),
        }
    }

    /// Pulls the next item, or `None` once the upstream ended, failed or `token` was cancelled.
    ///
    /// Whoever observes the cancellation while holding the upstream closes it.
    pub(crate) fn pull(&self, token: &CancellationToken) -> Option<S::Item> {
        let mut state = self.state.lock();
        if state.finished {
            return None;
        }
        if token.is_cancelled() {
            state.close();
            return None;
        }
        match state.stream.next() {
            Ok(Some(_)) if token.is_cancelled() => {
                state.close();
                None
            }
            Ok(Some(item)) => Some(item),
            Ok(None) => {
                state.finished = true;
                None
            }
            Err(e) => {
                trace!("shared upstream failed: {}", e);
                state.finished = true;
                state.error = Some(e);
                None
            }
        }
    }

    /// The upstream's terminal error, handed out once.
    pub(crate) fn take_error(&self) -> Option<FStreamError> {
        self.state.lock().error.take()
    }

    /// Closes the upstream unless a worker keeps it busy for longer than `grace`.
    ///
    /// Callers cancel the token first, so that worker closes it after its pull.
    pub(crate) fn close_within(&self, grace: Duration) {
        if let Some(mut state) = self.state.try_lock_for(grace) {
            state.close();
        }
    }
}

/// Type-erased shutdown hook of an operator's background workers.
pub(crate) trait Shutdown: Send + Sync {
    fn shutdown(&self, grace: Duration);
}
