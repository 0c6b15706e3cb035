//! Benchmarking module for the Holo Queue Bench suite.
//!
//! The statistical benchmarks live in `benches/queue_benchmarks.rs` and run
//! under Criterion with `cargo bench --features benchmarking`. This module
//! only hosts helpers shared with that harness.

use crate::config::BenchConfig;
use crate::data_structures::QueueKind;

/// A reduced sweep suitable for timing inside a Criterion iteration.
pub fn smoke_config(kind: QueueKind) -> BenchConfig {
    BenchConfig {
        thread_counts: vec![2],
        operations: 100_000,
        residual_display: 20,
        queues: vec![kind],
    }
}
