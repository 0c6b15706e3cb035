//! Holo Queue Bench Library
//!
//! This library contains the core components of the Holo Queue Bench suite:
//! the lock-free Michael-Scott queue, its locking and vendor comparators,
//! and the benchmark driver that measures them against each other. The
//! library is designed to be used by the binary crate, but can also be used
//! as a dependency by other projects.
//!
//! # Architecture
//!
//! The suite is designed with the following principles in mind:
//! - One shared operation set (`FifoQueue`) so implementations are
//!   interchangeable under the driver
//! - Lock-free concurrency for the core queue: no operation blocks, and
//!   system-wide progress is guaranteed under contention
//! - Explicit handles instead of ambient globals: queues and countdowns are
//!   passed into workers by `Arc`
//! - Comprehensive error handling and propagation for everything that is an
//!   error; an empty queue is not one

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod driver;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

// Feature-gated modules
#[cfg(feature = "benchmarking")]
pub mod bench;

/// Version information for the Holo Queue Bench suite.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function
pub fn init() -> error::HoloResult<()> {
    // Set up global error reporter with tracing
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));

    // Initialize default configuration
    config::init_default_config()?;

    Ok(())
}
