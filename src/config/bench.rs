//! Benchmark configuration section.

use serde::{Deserialize, Serialize};

use super::{ConfigResult, Validate};
use crate::data_structures::QueueKind;
use crate::error::config::ConfigError;

/// Largest thread count the sweep will accept. Far above anything useful,
/// this only guards against typos in a config file.
const MAX_THREADS: usize = 1024;

/// Configuration for the benchmark sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Thread counts to sweep, one benchmark run per entry per queue.
    pub thread_counts: Vec<usize>,

    /// Total operation budget per run, shared by all worker threads through
    /// a single countdown.
    pub operations: u64,

    /// Maximum number of residual values drained and displayed after a run.
    pub residual_display: usize,

    /// Queue implementations to benchmark, in report order.
    pub queues: Vec<QueueKind>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        // The stock sweep: powers of two up to 16 threads, four million
        // operations, twenty residuals shown.
        Self {
            thread_counts: vec![1, 2, 4, 8, 16],
            operations: 4_000_000,
            residual_display: 20,
            queues: QueueKind::ALL.to_vec(),
        }
    }
}

impl Validate for BenchConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.thread_counts.is_empty() {
            return Err(ConfigError::ValidationError(
                "thread_counts must not be empty".to_string(),
            ));
        }

        for &count in &self.thread_counts {
            if count == 0 || count > MAX_THREADS {
                return Err(ConfigError::ValueOutOfRange {
                    key: "bench.thread_counts".to_string(),
                    message: format!("each entry must be in 1..={MAX_THREADS}, got {count}"),
                });
            }
        }

        if self.operations == 0 {
            return Err(ConfigError::ValidationError(
                "operations must be greater than 0".to_string(),
            ));
        }

        if self.queues.is_empty() {
            return Err(ConfigError::ValidationError(
                "queues must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
