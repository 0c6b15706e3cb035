//! Tests for the Kahe Lock-Free Queue implementation.
//!
//! This module contains unit tests, concurrency tests, and property-based
//! tests for the Kahe Queue: FIFO order, no loss or duplication under
//! concurrency, immediate `None` on empty, and a linearizability spot-check.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use proptest::prelude::*;

use crate::data_structures::kahe_queue::KaheQueue;
use crate::tests::test_utils::ops_sequence_strategy;

/// Test basic queue operations (push/pop) in a single-threaded context
#[test]
fn test_basic_operations() {
    let queue = KaheQueue::new();

    // Test simple push and pop
    queue.push(1);
    queue.push(2);
    queue.push(3);

    assert_eq!(queue.pop(), Some(1));
    assert_eq!(queue.pop(), Some(2));
    assert_eq!(queue.pop(), Some(3));
    assert_eq!(queue.pop(), None);

    // Test interleaved push and pop
    queue.push(10);
    assert_eq!(queue.pop(), Some(10));
    queue.push(20);
    queue.push(30);
    assert_eq!(queue.pop(), Some(20));
    queue.push(40);
    assert_eq!(queue.pop(), Some(30));
    assert_eq!(queue.pop(), Some(40));
    assert_eq!(queue.pop(), None);
}

/// The canonical scenario: enqueue 10, 20; dequeue 10; enqueue 30; the
/// remaining dequeues yield 20, 30, then empty.
#[test]
fn test_concrete_scenario() {
    let queue = KaheQueue::new();

    queue.push(10);
    queue.push(20);
    assert_eq!(queue.pop(), Some(10));
    queue.push(30);
    assert_eq!(queue.pop(), Some(20));
    assert_eq!(queue.pop(), Some(30));
    assert_eq!(queue.pop(), None);
}

/// Dequeue on a fresh queue and on a fully drained queue returns `None`
/// immediately, every time.
#[test]
fn test_empty_on_empty() {
    let queue: KaheQueue<u64> = KaheQueue::new();
    assert_eq!(queue.pop(), None);
    assert_eq!(queue.pop(), None);

    queue.push(1);
    assert_eq!(queue.pop(), Some(1));
    for _ in 0..100 {
        assert_eq!(queue.pop(), None);
    }
}

/// The queue survives any operation sequence including `clear`: the dummy
/// always exists and the queue remains fully usable afterwards.
#[test]
fn test_clear_preserves_usability() {
    let queue = KaheQueue::new();

    for round in 0..5 {
        for i in 0..50 {
            queue.push(round * 50 + i);
        }
        queue.clear();
        assert_eq!(queue.pop(), None);
    }

    queue.push(99);
    assert_eq!(queue.pop(), Some(99));
}

/// Concurrency stress: N producer threads enqueue M unique values each, no
/// dequeues. After joining, draining yields exactly N*M values matching the
/// input multiset, with per-thread order preserved.
#[test]
fn test_concurrent_push() {
    const THREADS: usize = 10;
    const ITEMS_PER_THREAD: usize = 1_000;

    let queue = Arc::new(KaheQueue::new());
    let barrier = Arc::new(Barrier::new(THREADS));
    let mut handles = Vec::with_capacity(THREADS);

    for i in 0..THREADS {
        let queue_clone = Arc::clone(&queue);
        let barrier_clone = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            let base = i * ITEMS_PER_THREAD;
            barrier_clone.wait();

            for j in 0..ITEMS_PER_THREAD {
                queue_clone.push(base + j);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let mut seen = HashSet::new();
    let mut last_per_thread = vec![None::<usize>; THREADS];
    let mut count = 0;

    while let Some(item) = queue.pop() {
        count += 1;
        assert!(seen.insert(item), "Duplicate item found: {}", item);

        let producer = item / ITEMS_PER_THREAD;
        if let Some(prev) = last_per_thread[producer] {
            assert!(
                prev < item,
                "Per-thread FIFO order violated: {} before {}",
                prev,
                item
            );
        }
        last_per_thread[producer] = Some(item);
    }

    assert_eq!(count, THREADS * ITEMS_PER_THREAD);
    for i in 0..THREADS {
        for j in 0..ITEMS_PER_THREAD {
            assert!(seen.contains(&(i * ITEMS_PER_THREAD + j)));
        }
    }
}

/// No loss, no duplication: concurrent producers and consumers; every pushed
/// value is popped exactly once after the queue is drained.
#[test]
fn test_concurrent_push_pop() {
    const PRODUCERS: usize = 5;
    const CONSUMERS: usize = 5;
    const ITEMS_PER_PRODUCER: usize = 1_000;
    const TOTAL: usize = PRODUCERS * ITEMS_PER_PRODUCER;

    let queue = Arc::new(KaheQueue::new());
    let barrier = Arc::new(Barrier::new(PRODUCERS + CONSUMERS));
    let popped_count = Arc::new(AtomicUsize::new(0));
    let collected = Arc::new(parking_lot::Mutex::new(Vec::with_capacity(TOTAL)));

    let mut handles = Vec::new();

    for i in 0..PRODUCERS {
        let queue_clone = Arc::clone(&queue);
        let barrier_clone = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            let base = i * ITEMS_PER_PRODUCER;
            barrier_clone.wait();
            for j in 0..ITEMS_PER_PRODUCER {
                queue_clone.push(base + j);
            }
        }));
    }

    for _ in 0..CONSUMERS {
        let queue_clone = Arc::clone(&queue);
        let barrier_clone = Arc::clone(&barrier);
        let count_clone = Arc::clone(&popped_count);
        let collected_clone = Arc::clone(&collected);
        handles.push(thread::spawn(move || {
            let mut local = Vec::new();
            barrier_clone.wait();

            while count_clone.load(Ordering::Acquire) < TOTAL {
                match queue_clone.pop() {
                    Some(item) => {
                        local.push(item);
                        count_clone.fetch_add(1, Ordering::AcqRel);
                    }
                    None => thread::yield_now(),
                }
            }

            collected_clone.lock().append(&mut local);
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let collected = collected.lock();
    assert_eq!(collected.len(), TOTAL);

    let mut seen = HashSet::new();
    for &item in collected.iter() {
        assert!(seen.insert(item), "Duplicate item found: {}", item);
    }
    for i in 0..PRODUCERS {
        for j in 0..ITEMS_PER_PRODUCER {
            assert!(seen.contains(&(i * ITEMS_PER_PRODUCER + j)));
        }
    }

    assert_eq!(queue.pop(), None);
}

/// Linearizability spot-check: a consumer must never observe a value whose
/// enqueue had not started. Each producer raises a published flag before
/// pushing, so an unflagged observation would mean the pop linearized
/// before its push.
#[test]
fn test_linearizability_spot_check() {
    const VALUES: usize = 3_000;

    let queue = Arc::new(KaheQueue::new());
    let published: Arc<Vec<AtomicBool>> =
        Arc::new((0..VALUES).map(|_| AtomicBool::new(false)).collect());
    let barrier = Arc::new(Barrier::new(2));

    let producer = {
        let queue = Arc::clone(&queue);
        let published = Arc::clone(&published);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..VALUES {
                published[i].store(true, Ordering::Release);
                queue.push(i);
            }
        })
    };

    let consumer = {
        let queue = Arc::clone(&queue);
        let published = Arc::clone(&published);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            let mut received = 0;
            while received < VALUES {
                if let Some(item) = queue.pop() {
                    assert!(
                        published[item].load(Ordering::Acquire),
                        "value {} observed before its enqueue began",
                        item
                    );
                    received += 1;
                } else {
                    thread::yield_now();
                }
            }
        })
    };

    producer.join().expect("producer panicked");
    consumer.join().expect("consumer panicked");
    assert_eq!(queue.pop(), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn proptest_push_pop_sequence(operations in ops_sequence_strategy()) {
        let queue = KaheQueue::<i32>::new();
        let mut model = Vec::new();
        let mut next_value = 0;

        for &op_is_push in &operations {
            if op_is_push {
                queue.push(next_value);
                model.push(next_value);
                next_value += 1;
            } else if model.is_empty() {
                prop_assert_eq!(queue.pop(), None);
            } else {
                let expected = model.remove(0);
                prop_assert_eq!(queue.pop(), Some(expected));
            }
        }

        // Drain remaining items
        for expected in model {
            prop_assert_eq!(queue.pop(), Some(expected));
        }

        // Queue should be empty now
        prop_assert_eq!(queue.pop(), None);
    }
}
