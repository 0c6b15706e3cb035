//! Hui Vendor Queue Implementation
//!
//! A thin adapter over `crossbeam_queue::SegQueue`, the ecosystem's stock
//! unbounded thread-safe queue. It exists purely as a comparator: the
//! benchmark reports how the hand-rolled lock-free queue fares against an
//! off-the-shelf implementation with the same interface.

use crossbeam_queue::SegQueue;

/// An off-the-shelf concurrent FIFO queue exposed through the suite's
/// common operation set.
#[derive(Debug, Default)]
pub struct HuiQueue<T> {
    inner: SegQueue<T>,
}

impl<T> HuiQueue<T> {
    /// Creates a new empty `HuiQueue`.
    pub fn new() -> Self {
        Self {
            inner: SegQueue::new(),
        }
    }

    /// Enqueues a value at the back of the queue.
    pub fn push(&self, value: T) {
        self.inner.push(value);
    }

    /// Dequeues the value at the front, or `None` when empty.
    pub fn pop(&self) -> Option<T> {
        self.inner.pop()
    }

    /// Returns the current number of items in the queue.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
