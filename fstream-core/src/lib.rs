// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core contract and primitives of the fstream library.
//!
//! - [`FStream`]: the pull interface (`next` / `close`) every stream implements
//! - [`StreamItem`]: per-item success/failure wrapper used by concurrent operators
//! - [`SuppliableStream`]: bounded channel bridging producer threads and a consumer
//! - [`CancellationToken`]: cooperative "still running" flag for worker threads
//! - [`CloseGuard`]: closes an owned stream on drop

pub mod cancellation_token;
pub mod close_guard;
pub mod fstream;
mod logging;
pub mod stream_item;
pub mod suppliable_stream;

pub use self::cancellation_token::CancellationToken;
pub use self::close_guard::CloseGuard;
pub use self::fstream::{BoxFStream, FStream};
pub use self::stream_item::StreamItem;
pub use self::suppliable_stream::{Received, Supplied, SuppliableStream};
pub use fstream_error::{FStreamError, IntoFStreamError, Result, ResultExt};
