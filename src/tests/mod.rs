//! Test modules for the Holo Queue Bench suite.
//!
//! This module contains the cross-component test infrastructure:
//! - Unit and concurrency tests for each queue implementation
//! - Property-based tests using proptest
//! - Configuration loading tests
//! - Test fixtures and utilities
//!
//! The concurrency tests follow one rule throughout: assertions are made on
//! drained contents and counts, never on which thread performed a helping
//! CAS, since helping is best-effort and non-deterministic.

pub mod kahe_queue_tests;
pub mod test_utils;
