//! Error module for the Holo Queue Bench suite.
//!
//! This module provides the error handling framework for the application,
//! following Rust's idiomatic error handling patterns with explicit error
//! types and proper propagation.
//!
//! Note that an empty queue is deliberately NOT represented here: dequeue on
//! an empty queue yields `Option::None`, a normal result every caller checks,
//! never an error. CAS contention is likewise invisible to callers; the only
//! error surfaces in this system are configuration, IO, and serialization.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use thiserror::Error;

pub mod config;

/// Result type alias used throughout the Holo Queue Bench suite.
pub type HoloResult<T> = Result<T, HoloError>;

/// Core error enum for the Holo Queue Bench suite.
#[derive(Error, Debug)]
pub enum HoloError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors from report or config output.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are
    /// not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: HoloError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    pub fn new<S: Into<String>>(error: HoloError, component: S) -> Self {
        Self {
            error,
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    fn report(&self, context: ErrorContext);
}

/// A simple error reporter implementation that logs errors using the tracing
/// framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

/// Global error reporter instance, set once at startup.
static ERROR_REPORTER: OnceCell<Arc<dyn ErrorReporter>> = OnceCell::new();

/// Set the global error reporter. Later calls are ignored.
pub fn set_error_reporter(reporter: Arc<dyn ErrorReporter>) {
    if ERROR_REPORTER.set(reporter).is_err() {
        tracing::warn!("Error reporter was already set, ignoring new reporter");
    }
}

/// Report an error through the global reporter, falling back to stderr when
/// none has been configured.
pub fn report_error(context: ErrorContext) {
    match ERROR_REPORTER.get() {
        Some(reporter) => reporter.report(context),
        None => eprintln!("Error: {context}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HoloError::Custom("driver refused to start".to_string());
        assert_eq!(err.to_string(), "driver refused to start");

        let err = HoloError::Config(config::ConfigError::ValidationError(
            "operations must be greater than 0".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Configuration error: Configuration validation error: operations must be greater than 0"
        );
    }

    #[test]
    fn test_error_context_display() {
        let context = ErrorContext::new(
            HoloError::Custom("sweep failed".to_string()),
            "driver",
        )
        .with_details("thread count 16");

        let rendered = context.to_string();
        assert!(rendered.contains("Error in driver: sweep failed"));
        assert!(rendered.contains("Details: thread count 16"));
    }
}
