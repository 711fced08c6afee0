// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cmp::Ordering;

/// Binary min-heap ordered by a caller-supplied comparator.
///
/// `std::collections::BinaryHeap` needs `Ord` on the element, which a
/// closure-based ordering cannot provide.
pub(crate) struct ComparatorHeap<T, C> {
    items: Vec<T>,
    cmp: C,
}

impl<T, C> ComparatorHeap<T, C>
where
    C: FnMut(&T, &T) -> Ordering,
{
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cmp,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes the smallest item.
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let min = self.items.pop();
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// Replaces the smallest item with `item` and returns the old minimum.
    pub(crate) fn replace_min(&mut self, item: T) -> Option<T> {
        if self.items.is_empty() {
            self.push(item);
            return None;
        }
        let min = std::mem::replace(&mut self.items[0], item);
        self.sift_down(0);
        Some(min)
    }

    /// Keeps the `limit` greatest items seen so far: pushes while below
    /// `limit`, afterwards replaces the minimum when `item` is greater.
    pub(crate) fn offer(&mut self, item: T, limit: usize) {
        if self.items.len() < limit {
            self.push(item);
        } else if limit > 0 && (self.cmp)(&item, &self.items[0]) == Ordering::Greater {
            self.replace_min(item);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Consumes the heap, returning the items from greatest to smallest.
    pub(crate) fn into_sorted_desc(mut self) -> Vec<T> {
        let mut cmp = self.cmp;
        self.items.sort_by(|a, b| cmp(b, a));
        self.items
    }

    fn less(&mut self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.items.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, pos) {
                break;
            }
            self.items.swap(pos, child);
            pos = child;
        }
    }
}
