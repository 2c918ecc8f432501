//! Fixed-capacity swipe history
//!
//! A circular buffer that keeps the most recent items and silently discards
//! the oldest once full, so memory stays bounded no matter how long the
//! control loop runs.

use std::ops::Index;

/// Ring buffer over the last `capacity` items
///
/// `push` never fails: a full buffer drops its oldest entry first. Index 0
/// is always the oldest retained item.
#[derive(Debug)]
pub struct History<T> {
    slots: Vec<Option<T>>,
    head: usize, // next write position
    len: usize,
}

impl<T> History<T> {
    /// Create a buffer holding at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be non-zero");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    /// Maximum number of retained items
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of items currently held
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical slot of the i-th-oldest item
    fn slot_of(&self, index: usize) -> usize {
        let cap = self.slots.len();
        (self.head + cap - self.len + index) % cap
    }

    /// Append at the newest end, discarding the oldest item when full
    pub fn push(&mut self, item: T) {
        let cap = self.slots.len();
        self.slots[self.head] = Some(item);
        self.head = (self.head + 1) % cap;
        if self.len < cap {
            self.len += 1;
        }
    }

    /// Remove and return the oldest item
    pub fn pop_oldest(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let slot = self.slot_of(0);
        self.len -= 1;
        self.slots[slot].take()
    }

    /// Remove and return the newest item
    pub fn pop_newest(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let cap = self.slots.len();
        self.head = (self.head + cap - 1) % cap;
        self.len -= 1;
        self.slots[self.head].take()
    }

    /// Oldest retained item, if any
    pub fn oldest(&self) -> Option<&T> {
        self.get(0)
    }

    /// Newest retained item, if any
    pub fn newest(&self) -> Option<&T> {
        if self.len == 0 {
            None
        } else {
            self.get(self.len - 1)
        }
    }

    /// Item at logical position `index` (0 = oldest)
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.slots[self.slot_of(index)].as_ref()
        } else {
            None
        }
    }

    /// Iterate oldest to newest; `.rev()` walks newest to oldest
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            history: self,
            front: 0,
            back: self.len,
        }
    }
}

impl<T> Index<usize> for History<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("history index out of range")
    }
}

impl<T: Clone> Clone for History<T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            head: self.head,
            len: self.len,
        }
    }
}

/// Double-ended iterator over a `History`
pub struct Iter<'a, T> {
    history: &'a History<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front < self.back {
            let item = self.history.get(self.front);
            self.front += 1;
            item
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front < self.back {
            self.back -= 1;
            self.history.get(self.back)
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a History<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
