//! Configuration module for the Holo Queue Bench suite.
//!
//! This module provides a configuration system that can load settings from
//! files (TOML, JSON, YAML) and override them with environment variables.
//! All configuration values are validated for correctness before use. With
//! no file and no environment overrides the defaults reproduce the stock
//! benchmark sweep exactly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, ConfigError as ExternalConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::config::ConfigError;

pub mod bench;

pub use bench::BenchConfig;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default configuration location
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "HOLO";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the Holo Queue Bench suite.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HoloConfig {
    /// Benchmark sweep configuration
    pub bench: BenchConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for HoloConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.bench.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Initialize the default configuration for the Holo Queue Bench suite.
///
/// This loads the default configuration file and merges it with any
/// environment variables, then validates the result. A missing default file
/// is not an error; the built-in defaults are used instead.
pub fn init_default_config() -> ConfigResult<()> {
    let config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let loader = ConfigLoader::new(Some(config_path), ENV_PREFIX);

    let config = match loader.load() {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(_)) => {
            tracing::warn!(
                "Default configuration file not found at: {}",
                DEFAULT_CONFIG_PATH
            );
            HoloConfig::default()
        }
        Err(e) => return Err(e),
    };

    init_global_config(config);

    Ok(())
}

/// Configuration loader for the Holo Queue Bench suite.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override
    ///   configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from a file and environment variables,
    /// validating the result.
    pub fn load(&self) -> ConfigResult<HoloConfig> {
        let mut builder = Config::builder();

        // Start from the built-in defaults so partial files are fine.
        builder = builder.add_source(
            Config::try_from(&HoloConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let path_str = path
                .to_str()
                .ok_or_else(|| ConfigError::ParseError(format!("Non-UTF8 path: {path:?}")))?;

            builder = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => builder.add_source(File::with_name(path_str)),
                Some("json") => builder
                    .add_source(File::with_name(path_str).format(config::FileFormat::Json)),
                Some("yaml" | "yml") => builder
                    .add_source(File::with_name(path_str).format(config::FileFormat::Yaml)),
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            ExternalConfigError::Message(msg) => ConfigError::ParseError(msg),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let holo_config: HoloConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        holo_config.validate()?;

        Ok(holo_config)
    }
}

/// Global configuration accessor.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    config: Arc<HoloConfig>,
}

impl GlobalConfig {
    /// Creates a new global configuration.
    pub fn new(config: HoloConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration.
    pub fn get(&self) -> &HoloConfig {
        &self.config
    }
}

/// Global configuration instance.
static GLOBAL_CONFIG: OnceCell<GlobalConfig> = OnceCell::new();

/// Initialize the global configuration.
pub fn init_global_config(config: HoloConfig) {
    if GLOBAL_CONFIG.set(GlobalConfig::new(config)).is_err() {
        tracing::warn!("Global configuration was already initialized, ignoring new configuration");
    }
}

/// Get the global configuration.
///
/// # Panics
///
/// Panics if the global configuration has not been initialized.
pub fn get_global_config() -> GlobalConfig {
    GLOBAL_CONFIG
        .get()
        .expect("Global configuration not initialized")
        .clone()
}
