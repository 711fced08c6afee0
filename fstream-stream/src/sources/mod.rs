// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ways to start a pipeline.

mod generate;
mod iter;
mod producer;

pub use generate::{empty, once, repeat_with, unfold, Empty, Once, RepeatWith, Unfold};
pub use iter::{from_iter, IntoFStream, IterStream};
pub use producer::{from_producer, ProducerStream};
