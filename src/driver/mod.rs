//! Benchmark driver for the Holo Queue Bench suite.
//!
//! The driver is the load generator: for each configured queue kind and each
//! thread count in the sweep, it constructs a fresh queue instance, hands it
//! to a set of worker threads together with a shared operation countdown,
//! and measures the wall-clock time until the budget is exhausted. Workers
//! flip a coin per operation between enqueueing a thread-local counter value
//! and dequeueing.
//!
//! The queue under test and the countdown are passed by explicit `Arc`
//! handles into every worker; there is no ambient global state, and no state
//! leaks from one run into the next.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::BenchConfig;
use crate::data_structures::{FifoQueue, QueueKind};
use crate::error::{HoloError, HoloResult};

/// Outcome of a single benchmark run: one queue kind at one thread count.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Name of the queue implementation measured.
    pub queue: String,

    /// Number of worker threads in this run.
    pub threads: usize,

    /// Operation budget that was burned down.
    pub operations: u64,

    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,

    /// Up to `residual_display` values left in the queue after the run,
    /// drained front-first for manual inspection.
    pub residual: Vec<u64>,
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<14} {:>2} threads, {:>6} ms.",
            self.queue, self.threads, self.elapsed_ms
        )?;
        if self.residual.is_empty() {
            write!(f, " (empty)")
        } else {
            let shown: Vec<String> = self.residual.iter().map(u64::to_string).collect();
            write!(f, " {}", shown.join(", "))
        }
    }
}

/// Executes the full sweep described by `config`: every queue kind at every
/// thread count, one report per run.
pub fn run_sweep(config: &BenchConfig) -> HoloResult<Vec<RunReport>> {
    let available = num_cpus::get();
    if let Some(&max) = config.thread_counts.iter().max() {
        if max > available {
            warn!(
                requested = max,
                available,
                "sweep oversubscribes the machine; timings will include scheduling noise"
            );
        }
    }

    let mut reports = Vec::with_capacity(config.queues.len() * config.thread_counts.len());
    for &kind in &config.queues {
        for &threads in &config.thread_counts {
            reports.push(run_once(kind, threads, config)?);
        }
    }
    Ok(reports)
}

/// Executes one benchmark run against a freshly constructed queue.
pub fn run_once(kind: QueueKind, threads: usize, config: &BenchConfig) -> HoloResult<RunReport> {
    if threads == 0 {
        return Err(HoloError::Custom(
            "benchmark run requires at least one thread".to_string(),
        ));
    }

    // Fresh instance per run: no contamination from earlier rounds.
    let queue = kind.build();
    let countdown = Arc::new(AtomicI64::new(config.operations as i64));

    // Workers block on the barrier until the clock starts.
    let barrier = Arc::new(Barrier::new(threads + 1));

    debug!(queue = kind.name(), threads, operations = config.operations, "starting run");

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let countdown = Arc::clone(&countdown);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || worker(queue, countdown, barrier))
        })
        .collect();

    barrier.wait();
    let start = Instant::now();

    for handle in handles {
        handle
            .join()
            .map_err(|_| HoloError::Custom("benchmark worker panicked".to_string()))?;
    }

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let residual = queue.drain_front(config.residual_display);

    info!(
        queue = kind.name(),
        threads,
        elapsed_ms,
        residual = residual.len(),
        "run complete"
    );

    Ok(RunReport {
        queue: kind.name().to_string(),
        threads,
        operations: config.operations,
        elapsed_ms,
        residual,
    })
}

/// Worker loop: burn the shared countdown, flipping a coin per operation
/// between enqueueing the next thread-local key and dequeueing.
fn worker(queue: Arc<dyn FifoQueue<u64>>, countdown: Arc<AtomicI64>, barrier: Arc<Barrier>) {
    let mut rng = fastrand::Rng::new();
    let mut key: u64 = 0;

    barrier.wait();

    // fetch_sub may drive the counter below zero; only positive observations
    // grant an operation, so the total across threads matches the budget.
    while countdown.fetch_sub(1, Ordering::AcqRel) > 0 {
        if rng.bool() {
            queue.push(key);
            key += 1;
        } else {
            let _ = queue.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> BenchConfig {
        BenchConfig {
            thread_counts: vec![1, 2],
            operations: 20_000,
            residual_display: 20,
            queues: vec![QueueKind::Kahe],
        }
    }

    #[test]
    fn test_run_once_burns_the_budget() {
        let config = small_config();
        let report = run_once(QueueKind::Kahe, 2, &config).expect("run failed");

        assert_eq!(report.threads, 2);
        assert_eq!(report.operations, config.operations);
        assert!(report.residual.len() <= config.residual_display);
    }

    #[test]
    fn test_run_once_rejects_zero_threads() {
        let config = small_config();
        assert!(run_once(QueueKind::Kahe, 0, &config).is_err());
    }

    #[test]
    fn test_run_sweep_report_count() {
        let mut config = small_config();
        config.queues = vec![QueueKind::Kahe, QueueKind::Paa, QueueKind::Hui];
        config.operations = 5_000;

        let reports = run_sweep(&config).expect("sweep failed");
        assert_eq!(reports.len(), config.queues.len() * config.thread_counts.len());

        // Every report names its queue and stays within the residual cap.
        for report in &reports {
            assert!(!report.queue.is_empty());
            assert!(report.residual.len() <= config.residual_display);
        }
    }

    #[test]
    fn test_report_display_mentions_threads_and_ms() {
        let report = RunReport {
            queue: "kahe-lock-free".to_string(),
            threads: 4,
            operations: 1_000,
            elapsed_ms: 12,
            residual: vec![3, 1, 4],
        };
        let line = report.to_string();
        assert!(line.contains("4 threads"));
        assert!(line.contains("12 ms"));
        assert!(line.contains("3, 1, 4"));
    }
}
