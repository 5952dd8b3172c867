//! Fixed-capacity circular history buffer.
//!
//! Pushing past capacity silently evicts the single oldest sample, so the
//! buffer always holds the most recent `N` values in insertion order.
//! Indexing is O(1) via modular arithmetic over the head offset; iteration
//! yields elements oldest to newest.

use thiserror::Error;

/// Errors reported by element access on a [`RingBuffer`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    #[error("ring buffer is empty")]
    Empty,
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Fixed-capacity overwrite-oldest sequence.
///
/// Capacity is a compile-time constant and never changes after construction.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    data: Vec<T>,
    head: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(N),
            head: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append `value`; evicts the oldest element when full.
    pub fn push(&mut self, value: T) {
        if self.data.len() < N {
            self.data.push(value);
        } else {
            self.data[self.head] = value;
            self.head = (self.head + 1) % N;
        }
    }

    /// Logical index `i` counts from the oldest element.
    pub fn get(&self, index: usize) -> Result<&T, RingError> {
        if index >= self.data.len() {
            return Err(RingError::OutOfRange {
                index,
                len: self.data.len(),
            });
        }
        Ok(&self.data[self.physical(index)])
    }

    pub fn front(&self) -> Result<&T, RingError> {
        self.get(0).map_err(|_| RingError::Empty)
    }

    pub fn back(&self) -> Result<&T, RingError> {
        match self.data.len() {
            0 => Err(RingError::Empty),
            len => self.get(len - 1),
        }
    }

    /// Reset to empty. The head offset is rewound so subsequent pushes start
    /// from a clean physical layout.
    pub fn clear(&mut self) {
        self.data.clear();
        self.head = 0;
    }

    /// Oldest-to-newest iteration.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            ring: self,
            front: 0,
            back: self.data.len(),
        }
    }

    /// Cyclic cursor starting at the oldest element; supports signed stepping
    /// with wraparound over the logical sequence.
    pub fn cursor(&self) -> RingCursor<'_, T, N> {
        RingCursor { ring: self, pos: 0 }
    }

    fn physical(&self, logical: usize) -> usize {
        (self.head + logical) % self.data.len()
    }
}

impl<T: Clone, const N: usize> RingBuffer<T, N> {
    /// Discard all contents and fill to capacity with copies of `value`.
    /// O(N); used to seed a flat history line from a first sample.
    pub fn fill(&mut self, value: T) {
        self.data.clear();
        self.head = 0;
        self.data.resize(N, value);
    }

    /// Snapshot in oldest-to-newest order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a RingBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Double-ended oldest-to-newest iterator over a [`RingBuffer`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T, const N: usize> {
    ring: &'a RingBuffer<T, N>,
    front: usize,
    back: usize,
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = &self.ring.data[self.ring.physical(self.front)];
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for Iter<'_, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(&self.ring.data[self.ring.physical(self.back)])
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}

/// Position over the logical sequence that wraps on arbitrary signed steps.
///
/// The rendering layer steps this back and forth when sampling the history
/// line; it never outlives the borrow of the buffer, so it cannot observe a
/// mutation.
#[derive(Debug, Clone)]
pub struct RingCursor<'a, T, const N: usize> {
    ring: &'a RingBuffer<T, N>,
    pos: usize,
}

impl<T, const N: usize> RingCursor<'_, T, N> {
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn get(&self) -> Option<&T> {
        self.ring.get(self.pos).ok()
    }

    /// Move by `offset` logical elements, wrapping in either direction.
    /// A no-op on an empty buffer.
    pub fn step(&mut self, offset: isize) {
        let len = self.ring.len() as isize;
        if len == 0 {
            return;
        }
        let mut next = (self.pos as isize + offset) % len;
        if next < 0 {
            next += len;
        }
        self.pos = next as usize;
    }
}
