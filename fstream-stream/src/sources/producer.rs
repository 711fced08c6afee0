// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::debug;
use fstream_core::{FStream, FStreamError, Result, StreamItem, SuppliableStream};
use fstream_runtime::{catch_panic, Executor, NewThreadExecutor};

/// Stream fed by a producer callback running on its own thread.
/// Created by [`from_producer`].
#[derive(Debug)]
pub struct ProducerStream<T> {
    channel: SuppliableStream<T>,
}

/// Runs `producer` on a dedicated thread, handing it the supply side of a
/// channel holding at most `capacity` items.
///
/// When the producer returns `Ok`, supply ends normally; an `Err` or a panic
/// becomes the stream's terminal error, raised once the buffered items are
/// consumed. Closing the stream makes the producer's next `supply` fail with
/// [`FStreamError::Closed`].
///
/// # Errors
///
/// Fails if the producer thread cannot be started.
///
/// ```
/// use fstream_stream::{from_producer, TerminalExt};
///
/// let stream = from_producer(2, |sink| {
///     for word in ["pull", "based"] {
///         sink.supply(word)?;
///     }
///     Ok(())
/// })
/// .unwrap();
///
/// assert_eq!(stream.collect_vec().unwrap(), vec!["pull", "based"]);
/// ```
pub fn from_producer<T, P>(capacity: usize, producer: P) -> Result<ProducerStream<T>>
where
    T: Send + 'static,
    P: FnOnce(&SuppliableStream<T>) -> Result<()> + Send + 'static,
{
    let channel = SuppliableStream::new(capacity);
    let sink = channel.clone();
    NewThreadExecutor::new("fstream-producer").execute(Box::new(move || {
        match catch_panic(|| producer(&sink)) {
            StreamItem::Value(Ok(())) => sink.end_of_supply(),
            StreamItem::Value(Err(FStreamError::Closed)) => {
                debug!("producer stopped: consumer closed the stream");
            }
            StreamItem::Value(Err(e)) | StreamItem::Error(e) => sink.end_of_supply_with_error(e),
        }
    }))?;
    Ok(ProducerStream { channel })
}

impl<T: Send> FStream for ProducerStream<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        self.channel.next()
    }

    fn close(&mut self) {
        self.channel.close_channel();
    }
}

impl<T> Drop for ProducerStream<T> {
    fn drop(&mut self) {
        self.channel.close_channel();
    }
}
