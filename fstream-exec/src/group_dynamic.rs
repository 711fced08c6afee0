// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Splitting one stream into per-key sub-streams discovered on the fly.
//!
//! [`group_dynamic`](GroupDynamicExt::group_dynamic) returns a stream of
//! [`Group`]s. There is no background thread: whichever consumer (the outer
//! stream or any group) runs out of buffered values takes the shared lock
//! and pulls the upstream, routing every item to its group, until something
//! arrives for itself. Groups can therefore be consumed from different
//! threads, and within a group items keep their upstream order.
//!
//! Per-group channels are unbounded. A group that is never consumed keeps
//! buffering the items of its key.

use crate::logging::{debug, trace};
use fstream_core::{CancellationToken, FStream, FStreamError, Result, SuppliableStream};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::Duration;

const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Extension trait providing the [`group_dynamic`](Self::group_dynamic) operator.
pub trait GroupDynamicExt: FStream + Sized + 'static {
    /// Groups items by `key_of`, publishing a new [`Group`] the first time a
    /// key is seen.
    ///
    /// A group is published before its first item is routed to it. Closing a
    /// group unregisters it; if its key shows up again, a fresh group is
    /// published. An upstream error ends the outer stream and every live
    /// group with that error.
    ///
    /// ```
    /// use fstream_core::FStream;
    /// use fstream_exec::GroupDynamicExt;
    /// use fstream_stream::{IntoFStream, TerminalExt};
    ///
    /// let mut groups = vec![1, 2, 3, 4, 5].into_fstream().group_dynamic(|n| n % 2);
    ///
    /// let odd = groups.next().unwrap().unwrap();
    /// let even = groups.next().unwrap().unwrap();
    /// assert_eq!((*odd.key(), *even.key()), (1, 0));
    /// assert_eq!(odd.collect_vec().unwrap(), vec![1, 3, 5]);
    /// assert_eq!(even.collect_vec().unwrap(), vec![2, 4]);
    /// ```
    fn group_dynamic<K, F>(self, key_of: F) -> GroupedStream<K, Self::Item>
    where
        K: Eq + Hash + Clone + Send + 'static,
        Self::Item: Send + 'static,
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
    {
        let outer = SuppliableStream::unbounded();
        let grouper = Arc::new_cyclic(|me| Grouper {
            me: me.clone(),
            state: Mutex::new(GroupState {
                upstream: self,
                groups: HashMap::new(),
                finished: false,
                closed: false,
            }),
            key_of,
            outer: outer.clone(),
            token: CancellationToken::new(),
        });
        GroupedStream {
            outer,
            source: grouper,
            closed: false,
        }
    }
}

impl<S: FStream + 'static> GroupDynamicExt for S {}

trait GroupSource<K, T>: Send + Sync {
    /// Pulls upstream items while `starving` holds and the upstream has more.
    fn pump_while(&self, starving: &dyn Fn() -> bool);

    /// Forgets the closed group of `key`, unless the upstream is busy.
    fn release(&self, key: &K);

    fn shutdown(&self);
}

struct Grouper<S, K, F, T> {
    me: Weak<Self>,
    state: Mutex<GroupState<S, K, T>>,
    key_of: F,
    outer: SuppliableStream<Group<K, T>>,
    token: CancellationToken,
}

struct GroupState<S, K, T> {
    upstream: S,
    groups: HashMap<K, SuppliableStream<T>>,
    finished: bool,
    closed: bool,
}

impl<S, K, F, T> Grouper<S, K, F, T>
where
    S: FStream<Item = T> + 'static,
    K: Eq + Hash + Clone + Send + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
    T: Send + 'static,
{
    fn pump(&self, state: &mut GroupState<S, K, T>) {
        if self.token.is_cancelled() {
            self.close_locked(state);
            return;
        }
        match state.upstream.next() {
            Ok(Some(_)) if self.token.is_cancelled() => self.close_locked(state),
            Ok(Some(item)) => self.route(state, item),
            Ok(None) => self.finish_locked(state, None),
            Err(e) => self.finish_locked(state, Some(e)),
        }
    }

    fn route(&self, state: &mut GroupState<S, K, T>, item: T) {
        let key = (self.key_of)(&item);
        let channel = match state.groups.get(&key) {
            Some(channel) if !channel.is_closed() => channel.clone(),
            _ => self.open_group(state, key),
        };
        if channel.supply(item).is_err() {
            trace!("group_dynamic dropped an item for a closed group");
        }
    }

    fn open_group(&self, state: &mut GroupState<S, K, T>, key: K) -> SuppliableStream<T> {
        let channel = SuppliableStream::unbounded();
        state.groups.insert(key.clone(), channel.clone());
        if let Some(source) = self.me.upgrade() {
            let group = Group {
                key,
                channel: channel.clone(),
                source,
            };
            if self.outer.supply(group).is_err() {
                trace!("group_dynamic outer stream closed, new group discarded");
            }
        }
        debug!("group_dynamic opened group #{}", state.groups.len());
        channel
    }

    fn finish_locked(&self, state: &mut GroupState<S, K, T>, error: Option<FStreamError>) {
        if state.finished {
            return;
        }
        state.finished = true;
        for (_, channel) in state.groups.drain() {
            match &error {
                Some(e) => channel.end_of_supply_with_error(e.clone()),
                None => channel.end_of_supply(),
            }
        }
        match error {
            Some(e) => self.outer.end_of_supply_with_error(e),
            None => self.outer.end_of_supply(),
        }
    }

    fn close_locked(&self, state: &mut GroupState<S, K, T>) {
        if !state.closed {
            state.closed = true;
            state.upstream.close();
        }
        self.finish_locked(state, None);
    }
}

impl<S, K, F, T> GroupSource<K, T> for Grouper<S, K, F, T>
where
    S: FStream<Item = T> + 'static,
    K: Eq + Hash + Clone + Send + 'static,
    F: Fn(&T) -> K + Send + Sync + 'static,
    T: Send + 'static,
{
    fn pump_while(&self, starving: &dyn Fn() -> bool) {
        let mut state = self.state.lock();
        while !state.finished && starving() {
            self.pump(&mut state);
        }
        if self.token.is_cancelled() {
            self.close_locked(&mut state);
        }
    }

    fn release(&self, key: &K) {
        if let Some(mut state) = self.state.try_lock() {
            if state.groups.get(key).is_some_and(SuppliableStream::is_closed) {
                state.groups.remove(key);
            }
        }
    }

    fn shutdown(&self) {
        self.token.cancel();
        self.outer.close_channel();
        // a consumer blocked in the upstream closes it once it notices the token
        if let Some(mut state) = self.state.try_lock_for(SHUTDOWN_GRACE) {
            self.close_locked(&mut state);
        }
    }
}

/// Stream of [`Group`]s returned by [`GroupDynamicExt::group_dynamic`].
///
/// Closing it closes the upstream and ends every live group once its
/// buffered items are consumed.
pub struct GroupedStream<K, T> {
    outer: SuppliableStream<Group<K, T>>,
    source: Arc<dyn GroupSource<K, T>>,
    closed: bool,
}

impl<K: Send, T: Send> FStream for GroupedStream<K, T> {
    type Item = Group<K, T>;

    fn next(&mut self) -> Result<Option<Group<K, T>>> {
        if self.closed {
            return Ok(None);
        }
        loop {
            if let Some(group) = self.outer.poll()? {
                return Ok(Some(group));
            }
            if self.outer.is_drained() {
                return Ok(None);
            }
            let outer = &self.outer;
            self.source
                .pump_while(&|| outer.is_empty() && !outer.is_ended() && !outer.is_closed());
        }
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.source.shutdown();
        }
    }
}

impl<K, T> Drop for GroupedStream<K, T> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            self.source.shutdown();
        }
    }
}

/// The items of one key, in upstream order.
pub struct Group<K, T> {
    key: K,
    channel: SuppliableStream<T>,
    source: Arc<dyn GroupSource<K, T>>,
}

impl<K, T> Group<K, T> {
    /// The key shared by every item of this group.
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Send, T: Send> FStream for Group<K, T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.channel.poll()? {
                return Ok(Some(item));
            }
            if self.channel.is_drained() {
                return Ok(None);
            }
            let channel = &self.channel;
            self.source.pump_while(&|| {
                channel.is_empty() && !channel.is_ended() && !channel.is_closed()
            });
        }
    }

    fn close(&mut self) {
        if !self.channel.is_closed() {
            self.channel.close_channel();
            self.source.release(&self.key);
        }
    }
}

impl<K, T> Drop for Group<K, T> {
    fn drop(&mut self) {
        if !self.channel.is_closed() {
            self.channel.close_channel();
            self.source.release(&self.key);
        }
    }
}

impl<K: fmt::Debug, T> fmt::Debug for Group<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("key", &self.key)
            .field("buffered", &self.channel.len())
            .finish()
    }
}
