//! Test utilities and fixtures for the Holo Queue Bench suite.
//!
//! Reusable helpers for property-based and configuration tests.

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use tempfile::TempDir;

/// Upper bound on generated operation sequences.
const MAX_OPS: usize = 200;

/// Create a temporary directory for test files.
pub fn create_test_dir() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}

/// Strategy producing a sequence of queue operations, where `true` is a push
/// and `false` a pop.
pub fn ops_sequence_strategy() -> BoxedStrategy<Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 1..MAX_OPS).boxed()
}
