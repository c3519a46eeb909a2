//! Configuration management

use clap::{Parser, Subcommand};
use config::{Config as ConfigBuilder, ConfigBuilder as Builder, ConfigError as BuilderError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid api configuration: {0}")]
    InvalidApi(String),

    #[error("Invalid storage configuration: {0}")]
    InvalidStorage(String),

    #[error("Invalid logging configuration: {0}")]
    InvalidLogging(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

impl From<BuilderError> for ConfigError {
    fn from(err: BuilderError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration with precedence: CLI args > Environment variables > Config file > Defaults
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        if let Some(config_path) = &cli_args.config {
            if !config_path.exists() {
                return Err(ConfigError::FileNotFound(
                    config_path.display().to_string()
                ));
            }
            builder = builder.add_source(File::from(config_path.as_path()));
        }

        // Environment variables are prefixed with MTSSBJ_ and use __ for nesting
        // Example: MTSSBJ_API__BASE_URL=https://intranet.example.com
        builder = builder.add_source(
            Environment::with_prefix("MTSSBJ")
                .separator("__")
                .try_parsing(true)
        );

        if let Some(base_url) = &cli_args.base_url {
            builder = builder.set_override("api.base_url", base_url.clone())?;
        }
        if let Some(session_file) = &cli_args.session_file {
            builder = builder.set_override("storage.session_file", session_file.display().to_string())?;
        }
        if let Some(log_level) = &cli_args.log_level {
            builder = builder.set_override("logging.level", log_level.clone())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file path on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let config: Config = Self::defaults()?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<Builder<DefaultState>, ConfigError> {
        Ok(ConfigBuilder::builder()
            .set_default("api.base_url", "http://127.0.0.1:8080")?
            .set_default("api.api_prefix", "/api/v1")?
            .set_default("api.request_timeout", 30)?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "text")?
            .set_default("logging.output", "stderr")?
            .set_default("logging.max_file_size", 10485760)? // 10 MB
            .set_default("logging.max_backups", 5)?)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Command-line arguments for the dashboard client
#[derive(Debug, Parser)]
#[command(name = "mtssbj")]
#[command(about = "MTSSBJ dashboard client", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Session file path
    #[arg(long, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is active
    Status,
    /// Show projects, news, notices, timeline and this week's calendar
    Dashboard {
        #[arg(short, long)]
        keyword: Option<String>,
    },
    /// Show the weekly calendar containing a date (YYYY-MM-DD)
    Calendar {
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show the navigation menu
    Menu {
        /// Expand every submenu
        #[arg(long)]
        expand_all: bool,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub request_timeout: u64, // seconds
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidApi(format!("base_url is not a valid URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidApi("base_url must use http or https".to_string()));
        }

        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(ConfigError::InvalidApi("api_prefix must start with '/'".to_string()));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidApi("request_timeout must be greater than 0".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    pub session_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.session_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidStorage("session_file cannot be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Session file location, falling back to the platform data directory
    pub fn session_path(&self) -> PathBuf {
        match &self.session_file {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mtssbj")
                .join("session.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
    pub log_file: Option<PathBuf>,
    pub max_file_size: usize, // bytes
    pub max_backups: usize,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::InvalidLogging(
                format!("level must be one of: {:?}", valid_levels)
            ));
        }

        let valid_formats = ["json", "text"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidLogging(
                format!("format must be one of: {:?}", valid_formats)
            ));
        }

        let valid_outputs = ["stderr", "file"];
        if !valid_outputs.contains(&self.output.as_str()) {
            return Err(ConfigError::InvalidLogging(
                format!("output must be one of: {:?}", valid_outputs)
            ));
        }

        if self.output == "file" && self.log_file.is_none() {
            return Err(ConfigError::InvalidLogging(
                "log_file must be specified when output is 'file'".to_string()
            ));
        }

        if self.max_file_size == 0 {
            return Err(ConfigError::InvalidLogging("max_file_size must be greater than 0".to_string()));
        }

        if self.max_backups == 0 {
            return Err(ConfigError::InvalidLogging("max_backups must be greater than 0".to_string()));
        }

        Ok(())
    }
}
