//! Holo Queue Bench - Main entrypoint.
//!
//! This is the main entry point for the Holo Queue Bench application. It
//! initializes the logging system, loads configuration, and runs the
//! benchmark sweep. With no arguments it reproduces the stock sweep: every
//! queue implementation across thread counts {1, 2, 4, 8, 16}, four million
//! operations per run, up to twenty residual values printed per line.

mod config;
mod data_structures;
mod driver;
mod error;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use data_structures::QueueKind;
use error::{set_error_reporter, HoloError, HoloResult, TracingErrorReporter};

/// Command line arguments for the Holo Queue Bench suite.
#[derive(Parser, Debug)]
#[clap(name = "Holo Queue Bench", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Run the benchmark sweep
    Run {
        /// Restrict the sweep to a single queue implementation
        #[clap(short, long, value_enum)]
        queue: Option<QueueKind>,

        /// Emit reports as JSON instead of plain text
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging() -> HoloResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_line_number(true)
        .with_file(true)
        .with_thread_names(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| HoloError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Main entry point for the application.
fn main() -> HoloResult<()> {
    // Initialize logging early to capture any startup errors
    init_logging()?;

    // Set up error reporter
    set_error_reporter(Arc::new(TracingErrorReporter));

    // Parse command-line arguments
    let args = <Args as clap::Parser>::parse();

    let env_prefix = "HOLO";
    let config_loader = config::ConfigLoader::new(args.config.as_deref(), env_prefix);

    match args.command.unwrap_or(Command::Run {
        queue: None,
        json: false,
    }) {
        Command::Run { queue, json } => {
            info!("Starting Holo Queue Bench sweep");

            let mut holo_config = match config_loader.load() {
                Ok(config) => config,
                Err(e) => {
                    error::report_error(
                        error::ErrorContext::new(e.into(), "config")
                            .with_details("benchmark sweep cannot start without a valid configuration"),
                    );
                    process::exit(1);
                }
            };

            if let Some(kind) = queue {
                holo_config.bench.queues = vec![kind];
            }

            config::init_global_config(holo_config.clone());

            let reports = driver::run_sweep(&holo_config.bench)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{report}");
                }
            }

            Ok(())
        }
        Command::Validate => {
            info!("Validating configuration");
            match config_loader.load() {
                Ok(_) => {
                    info!("Configuration validated successfully");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("Configuration validation error: {}", e);
                    process::exit(1);
                }
            }
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = config::HoloConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(HoloError::Io)?;
            }

            // Serialize to TOML
            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| HoloError::Custom(format!("Failed to serialize config: {e}")))?;

            // Write to file
            std::fs::write(&output, toml).map_err(HoloError::Io)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
