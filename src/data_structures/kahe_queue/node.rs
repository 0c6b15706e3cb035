//! Node implementation for the Kahe Lock-Free Queue.
//!
//! Nodes are the fundamental building blocks of the lock-free queue, each
//! holding a payload slot and an atomic reference to the next node. The next
//! pointer is only ever changed through the queue's compare-and-swap loops.

use std::cell::UnsafeCell;

use crossbeam_epoch::Atomic;

/// A node in the Kahe Lock-Free Queue.
///
/// The payload is written once at construction and taken at most once when
/// the node is consumed. It is wrapped in an `UnsafeCell` to allow the take
/// operation through a shared reference in a lock-free context.
///
/// # Type Parameters
///
/// * `T` - Type of the value stored in the node. Must be `Send`.
#[derive(Debug)]
pub struct Node<T: Send> {
    /// The value stored in this node. `None` for the sentinel and for nodes
    /// whose value has already been taken.
    pub(crate) value: UnsafeCell<Option<T>>,

    /// Epoch-managed pointer to the next node in the queue.
    pub(crate) next: Atomic<Node<T>>,
}

impl<T: Send> Node<T> {
    /// Creates a new node carrying the given value, with a null next pointer.
    pub fn new(value: T) -> Self {
        Self {
            value: UnsafeCell::new(Some(value)),
            next: Atomic::null(),
        }
    }

    /// Creates a new sentinel (dummy) node with no value.
    ///
    /// Every queue owns exactly one sentinel at a time; it is never exposed
    /// as a dequeued value.
    pub fn sentinel() -> Self {
        Self {
            value: UnsafeCell::new(None),
            next: Atomic::null(),
        }
    }

    /// Takes the value out of this node, if it exists.
    ///
    /// # Safety (contract)
    ///
    /// May only be called by the thread that won the head CAS retiring the
    /// predecessor of this node. That CAS makes the caller the unique
    /// consumer of this slot, so no other thread can race on the cell.
    pub(crate) fn take(&self) -> Option<T> {
        // SAFETY: exclusive consumption is guaranteed by the queue's pop
        // protocol; see the contract above.
        unsafe { (*self.value.get()).take() }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn test_node_new() {
        let node = Node::new(42);

        unsafe {
            assert_eq!(*node.value.get(), Some(42));
        }

        let guard = unsafe { crossbeam_epoch::unprotected() };
        assert!(node.next.load(Ordering::Relaxed, guard).is_null());
    }

    #[test]
    fn test_node_sentinel() {
        let node: Node<i32> = Node::sentinel();

        unsafe {
            assert_eq!(*node.value.get(), None);
        }

        let guard = unsafe { crossbeam_epoch::unprotected() };
        assert!(node.next.load(Ordering::Relaxed, guard).is_null());
    }

    #[test]
    fn test_node_take() {
        let node = Node::new(42);

        assert_eq!(node.take(), Some(42));

        // The value is gone after taking it once.
        assert_eq!(node.take(), None);
    }
}
