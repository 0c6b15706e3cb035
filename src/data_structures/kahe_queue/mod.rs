//! Kahe Lock-Free Queue Implementation
//!
//! This module provides a high-performance, lock-free concurrent FIFO queue
//! implementation based on the Michael-Scott queue algorithm, the measured
//! centerpiece of the Holo benchmark suite.
//!
//! # Key Features
//!
//! * Lock-free push and pop operations for multi-producer/multi-consumer use
//! * A permanently present dummy-head sentinel that simplifies the protocol
//! * Best-effort helping for a lagging tail pointer, so no thread can stall
//!   the queue by being preempted between its two enqueue CASes
//!
//! # Concurrency Safety
//!
//! The implementation uses the following concurrency patterns:
//!
//! * **Atomic Operations**: `head` and `tail` are the only shared mutable
//!   state and are updated exclusively through compare-and-swap
//!
//! * **Interior Mutability**: the `Node` payload slot uses an `UnsafeCell`
//!   so the winning dequeuer can take the value through a shared reference
//!
//! * **Memory Reclamation**: epoch-based deferred reclamation via
//!   `crossbeam-epoch`. Every operation runs under a pinned guard; a retired
//!   dummy is handed to `Guard::defer_destroy` and freed only once no thread
//!   can still hold a reference to it
//!
//! # Progress Guarantee
//!
//! Operations are lock-free, not wait-free: an individual call may retry
//! under contention, but every failed CAS implies some other thread's
//! operation succeeded, so system-wide progress is guaranteed. No operation
//! ever blocks, and pop on an empty queue returns immediately.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_epoch::{self as epoch, Atomic, Owned, Shared};

mod node;
pub use node::Node;

/// KaheQueue is a lock-free unbounded FIFO queue for concurrent
/// producer/consumer workloads.
///
/// `head` always points at a dummy (already consumed) node; the node after
/// it is the logical front. `tail` points at the last node, or transiently
/// lags one node behind it while an enqueue is between its linking CAS and
/// its tail-swing CAS. Any thread that observes the lag helps advance the
/// tail before proceeding.
///
/// # Type Parameters
///
/// * `T` - Type of items stored in the queue. Must be `Send`.
#[derive(Debug)]
pub struct KaheQueue<T: Send> {
    /// Pointer to the current dummy node; never null.
    head: Atomic<Node<T>>,

    /// Pointer to the last node, possibly lagging during an enqueue race.
    tail: Atomic<Node<T>>,

    /// Approximate number of items in the queue. Advisory only: under
    /// concurrency the value may be immediately outdated.
    count: AtomicUsize,
}

impl<T: Send> KaheQueue<T> {
    /// Creates a new empty `KaheQueue`.
    ///
    /// The queue is constructed with a single sentinel node that `head` and
    /// `tail` both reference and that is never exposed as a value.
    pub fn new() -> Self {
        // No concurrent access can exist before construction completes, so
        // an unprotected guard is sufficient here.
        let sentinel = Owned::new(Node::sentinel()).into_shared(unsafe { epoch::unprotected() });

        Self {
            head: Atomic::from(sentinel),
            tail: Atomic::from(sentinel),
            count: AtomicUsize::new(0),
        }
    }

    /// Returns the approximate number of items in the queue.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// Returns whether the queue is (approximately) empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enqueues a value at the tail of the queue.
    ///
    /// Never fails and never blocks. Exactly one successful linking CAS is
    /// performed per call; all other CAS attempts are either best-effort
    /// helping moves or retried linking attempts, so no value is ever lost
    /// or duplicated.
    pub fn push(&self, value: T) {
        let guard = &epoch::pin();
        let new = Owned::new(Node::new(value)).into_shared(guard);

        loop {
            // Snapshot order matters: read the tail before its next pointer.
            let last = self.tail.load(Ordering::Acquire, guard);
            let last_ref = unsafe { last.deref() };
            let next = last_ref.next.load(Ordering::Acquire, guard);

            // Another thread moved the tail since our snapshot; retry.
            if last != self.tail.load(Ordering::Acquire, guard) {
                continue;
            }

            if !next.is_null() {
                // The tail lags behind the real last node. Help advance it
                // (outcome ignored, someone will succeed) and retry.
                let _ = self.tail.compare_exchange(
                    last,
                    next,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                );
                continue;
            }

            // The tail genuinely points at the last node; try to link.
            match last_ref.next.compare_exchange(
                Shared::null(),
                new,
                Ordering::Release,
                Ordering::Relaxed,
                guard,
            ) {
                Ok(_) => {
                    // Linked. Swing the tail over the new node, best-effort:
                    // a failure means another thread already helped us.
                    let _ = self.tail.compare_exchange(
                        last,
                        new,
                        Ordering::Release,
                        Ordering::Relaxed,
                        guard,
                    );
                    self.count.fetch_add(1, Ordering::SeqCst);
                    return;
                }
                Err(_) => {
                    // Lost the linking race; retry from a fresh snapshot.
                    continue;
                }
            }
        }
    }

    /// Dequeues the value at the front of the queue.
    ///
    /// Returns `None` immediately when the queue is empty; the empty case is
    /// a distinguishable non-error result, not a failure. Never blocks.
    pub fn pop(&self) -> Option<T> {
        let guard = &epoch::pin();

        loop {
            // Snapshot head, tail, then head.next, in that order.
            let first = self.head.load(Ordering::Acquire, guard);
            let last = self.tail.load(Ordering::Acquire, guard);
            let first_ref = unsafe { first.deref() };
            let next = first_ref.next.load(Ordering::Acquire, guard);

            // Another thread moved the head since our snapshot; retry.
            if first != self.head.load(Ordering::Acquire, guard) {
                continue;
            }

            if next.is_null() {
                // Nothing after the dummy: the queue is empty.
                return None;
            }

            if first == last {
                // A node is linked but the tail has not been swung yet. Help
                // advance the tail and retry; consuming now could leave the
                // tail pointing behind the head.
                let _ = self.tail.compare_exchange(
                    last,
                    next,
                    Ordering::Release,
                    Ordering::Relaxed,
                    guard,
                );
                continue;
            }

            // Try to retire the current dummy and make `next` the new one.
            match self.head.compare_exchange(
                first,
                next,
                Ordering::Release,
                Ordering::Relaxed,
                guard,
            ) {
                Ok(_) => {
                    // Winning this CAS makes us the unique consumer of
                    // `next`'s payload slot. The pinned guard keeps `next`
                    // alive even if a faster dequeuer retires it right away.
                    let next_ref = unsafe { next.deref() };
                    let value = next_ref.take();
                    self.count.fetch_sub(1, Ordering::SeqCst);

                    // SAFETY: `first` is unreachable for new operations once
                    // the head CAS committed; the epoch scheme delays the
                    // actual free until all current guards have unpinned.
                    unsafe {
                        guard.defer_destroy(first);
                    }
                    return value;
                }
                Err(_) => {
                    // Head was moved by another thread; retry.
                    continue;
                }
            }
        }
    }

    /// Drains the queue by popping until it reports empty, discarding values.
    ///
    /// Not atomic with respect to concurrent mutators: racing producers may
    /// leave new elements behind. Must only be used when the caller
    /// guarantees no concurrent access, e.g. between benchmark rounds.
    pub fn clear(&self) {
        while self.pop().is_some() {}
    }

    /// Pops up to `limit` values for diagnostic display.
    ///
    /// Stops early when the queue reports empty. Has no concurrency contract
    /// beyond calling `pop` correctly.
    pub fn drain_front(&self, limit: usize) -> Vec<T> {
        let mut drained = Vec::with_capacity(limit.min(64));
        for _ in 0..limit {
            match self.pop() {
                Some(value) => drained.push(value),
                None => break,
            }
        }
        drained
    }
}

impl<T: Send> Default for KaheQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> Drop for KaheQueue<T> {
    fn drop(&mut self) {
        // Exclusive access: walk the list from the dummy and free every
        // remaining node, payloads included, without going through the
        // deferred machinery.
        unsafe {
            let guard = epoch::unprotected();
            let mut node = self.head.load(Ordering::Relaxed, guard);
            while !node.is_null() {
                let next = node.deref().next.load(Ordering::Relaxed, guard);
                drop(node.into_owned());
                node = next;
            }
        }
    }
}

// SAFETY: the queue hands each value to exactly one consumer, and all shared
// state is managed through atomics and epoch guards.
unsafe impl<T: Send> Send for KaheQueue<T> {}
unsafe impl<T: Send> Sync for KaheQueue<T> {}
