//! Queue implementations for the Holo benchmark suite.
//!
//! This module contains the three FIFO queues the suite measures against one
//! another, all exposing the same minimal operation set:
//! - `KaheQueue`: the lock-free Michael-Scott queue, the engineering core
//! - `PaaQueue`: the mutex-guarded baseline
//! - `HuiQueue`: an off-the-shelf vendor queue for comparison

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod hui_queue;
pub mod kahe_queue;
pub mod paa_queue;

// Re-export common data structures
pub use hui_queue::HuiQueue;
pub use kahe_queue::KaheQueue;
pub use paa_queue::PaaQueue;

/// The operation set shared by every queue in the suite.
///
/// Comparator implementations must expose exactly this interface so the
/// benchmark driver can swap them without changing the workload. Dequeue on
/// an empty queue yields `None`: a distinguishable non-error result that is
/// disjoint from every legitimate payload by construction, never a failure.
pub trait FifoQueue<T: Send>: Send + Sync {
    /// Enqueues a value at the back of the queue. Never fails, never blocks.
    fn push(&self, value: T);

    /// Dequeues the front value, or `None` when the queue is empty.
    fn pop(&self) -> Option<T>;

    /// Approximate number of items; advisory under concurrency.
    fn len(&self) -> usize;

    /// Whether the queue is (approximately) empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains the queue, discarding values. Non-concurrent use only: racing
    /// producers may leave new elements behind.
    fn clear(&self) {
        while self.pop().is_some() {}
    }

    /// Pops up to `limit` values for diagnostic display, stopping early when
    /// the queue reports empty.
    fn drain_front(&self, limit: usize) -> Vec<T> {
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

impl<T: Send> FifoQueue<T> for KaheQueue<T> {
    fn push(&self, value: T) {
        KaheQueue::push(self, value);
    }

    fn pop(&self) -> Option<T> {
        KaheQueue::pop(self)
    }

    fn len(&self) -> usize {
        KaheQueue::len(self)
    }

    fn clear(&self) {
        KaheQueue::clear(self);
    }

    fn drain_front(&self, limit: usize) -> Vec<T> {
        KaheQueue::drain_front(self, limit)
    }
}

impl<T: Send> FifoQueue<T> for PaaQueue<T> {
    fn push(&self, value: T) {
        PaaQueue::push(self, value);
    }

    fn pop(&self) -> Option<T> {
        PaaQueue::pop(self)
    }

    fn len(&self) -> usize {
        PaaQueue::len(self)
    }

    fn clear(&self) {
        PaaQueue::clear(self);
    }
}

impl<T: Send> FifoQueue<T> for HuiQueue<T> {
    fn push(&self, value: T) {
        HuiQueue::push(self, value);
    }

    fn pop(&self) -> Option<T> {
        HuiQueue::pop(self)
    }

    fn len(&self) -> usize {
        HuiQueue::len(self)
    }
}

/// Selector for the queue implementations the driver can benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum QueueKind {
    /// The lock-free Michael-Scott queue.
    Kahe,
    /// The mutex-guarded baseline.
    Paa,
    /// The vendor-supplied comparator.
    Hui,
}

impl QueueKind {
    /// All selectable queue kinds, in report order.
    pub const ALL: [QueueKind; 3] = [QueueKind::Kahe, QueueKind::Paa, QueueKind::Hui];

    /// Human-readable name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            QueueKind::Kahe => "kahe-lock-free",
            QueueKind::Paa => "paa-mutex",
            QueueKind::Hui => "hui-vendor",
        }
    }

    /// Constructs a fresh instance of the selected queue.
    pub fn build(&self) -> Arc<dyn FifoQueue<u64>> {
        match self {
            QueueKind::Kahe => Arc::new(KaheQueue::new()),
            QueueKind::Paa => Arc::new(PaaQueue::new()),
            QueueKind::Hui => Arc::new(HuiQueue::new()),
        }
    }
}

impl std::fmt::Display for QueueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
