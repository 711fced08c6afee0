// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative cancellation for worker threads.
//!
//! Threads are never interrupted. A worker checks its token at safe points
//! (between items, before blocking operations) and stops on its own; whoever
//! cancels also closes the channels the worker may be parked in.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable "still running" flag shared between a stream and its workers.
///
/// When `cancel()` is called on any clone, `is_cancelled()` becomes `true` for
/// all clones.
///
/// # Example
///
/// ```
/// use fstream_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let worker_token = token.clone();
///
/// let worker = std::thread::spawn(move || {
///     let mut ticks = 0u32;
///     while !worker_token.is_cancelled() {
///         ticks += 1;
///         std::thread::yield_now();
///     }
///     ticks
/// });
///
/// token.cancel();
/// assert!(worker.join().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    ///
    /// The token is initially not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check if the token has been cancelled (non-blocking).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
