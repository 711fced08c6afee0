// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fstream_core::{FStream, Result};
use std::marker::PhantomData;

/// A stream that never yields. Created by [`empty`].
#[derive(Debug)]
pub struct Empty<T> {
    _item: PhantomData<fn() -> T>,
}

pub fn empty<T>() -> Empty<T> {
    Empty { _item: PhantomData }
}

impl<T> FStream for Empty<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        Ok(None)
    }

    fn close(&mut self) {}
}

/// A stream yielding exactly one value. Created by [`once`].
#[derive(Debug)]
pub struct Once<T> {
    value: Option<T>,
}

pub fn once<T: Send>(value: T) -> Once<T> {
    Once { value: Some(value) }
}

impl<T: Send> FStream for Once<T> {
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        Ok(self.value.take())
    }

    fn close(&mut self) {
        self.value = None;
    }
}

/// Generator stream driven by a state value. Created by [`unfold`].
pub struct Unfold<St, F> {
    state: Option<St>,
    f: F,
}

/// Builds a stream from an initial state and a step function.
///
/// Each call to `f` receives the current state and returns the next item
/// with the following state, or `None` to end the stream.
///
/// ```
/// use fstream_stream::{unfold, TerminalExt};
///
/// let powers = unfold(1u32, |n| (n <= 16).then(|| (n, n * 2)));
/// assert_eq!(powers.collect_vec().unwrap(), vec![1, 2, 4, 8, 16]);
/// ```
pub fn unfold<St, T, F>(init: St, f: F) -> Unfold<St, F>
where
    St: Send,
    F: FnMut(St) -> Option<(T, St)> + Send,
{
    Unfold {
        state: Some(init),
        f,
    }
}

impl<St, T, F> FStream for Unfold<St, F>
where
    St: Send,
    F: FnMut(St) -> Option<(T, St)> + Send,
{
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        let Some(state) = self.state.take() else {
            return Ok(None);
        };
        Ok((self.f)(state).map(|(item, next)| {
            self.state = Some(next);
            item
        }))
    }

    fn close(&mut self) {
        self.state = None;
    }
}

/// Endless stream calling a function for every item. Created by [`repeat_with`].
pub struct RepeatWith<F> {
    f: F,
    closed: bool,
}

pub fn repeat_with<T, F>(f: F) -> RepeatWith<F>
where
    F: FnMut() -> T + Send,
{
    RepeatWith { f, closed: false }
}

impl<T, F> FStream for RepeatWith<F>
where
    F: FnMut() -> T + Send,
{
    type Item = T;

    fn next(&mut self) -> Result<Option<T>> {
        if self.closed {
            return Ok(None);
        }
        Ok(Some((self.f)()))
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
