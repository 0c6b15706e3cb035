//! Paa Mutex-Guarded Queue Implementation
//!
//! The locking baseline for the benchmark suite: a plain FIFO protected by a
//! single mutex. Every operation takes the lock, so throughput degrades with
//! contention; that degradation is exactly what the benchmark measures the
//! lock-free queue against.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// A mutex-guarded FIFO queue with the same operation set as the lock-free
/// queue, so the benchmark driver can use them interchangeably.
#[derive(Debug, Default)]
pub struct PaaQueue<T> {
    inner: Mutex<VecDeque<T>>,
}

impl<T> PaaQueue<T> {
    /// Creates a new empty `PaaQueue`.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    /// Enqueues a value at the back of the queue.
    pub fn push(&self, value: T) {
        self.inner.lock().push_back(value);
    }

    /// Dequeues the value at the front, or `None` when empty.
    pub fn pop(&self) -> Option<T> {
        self.inner.lock().pop_front()
    }

    /// Returns the current number of items in the queue.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Removes all items from the queue.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = PaaQueue::new();

        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_clear() {
        let queue = PaaQueue::new();
        for i in 0..10 {
            queue.push(i);
        }
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
