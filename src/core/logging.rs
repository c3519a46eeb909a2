//! Structured logging
//!
//! Log records go to stderr so they never interleave with the dashboard
//! output on stdout, or to a size-rotated file.

use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the non-blocking writer alive; drop it to flush pending records
pub struct Logger {
    _guard: WorkerGuard,
}

impl Logger {
    /// Install the global tracing subscriber described by `config`
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let level = parse_log_level(&config.level)?;

        // RUST_LOG wins over the configured level
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        let (writer, guard) = match config.output.as_str() {
            "stderr" => tracing_appender::non_blocking(io::stderr()),
            "file" => {
                let log_file = config.log_file.as_ref()
                    .context("log_file must be specified when output is 'file'")?;

                if let Some(parent) = log_file.parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create log directory")?;
                }

                let appender = RollingFileAppender::for_path(
                    log_file,
                    config.max_file_size,
                    config.max_backups,
                )?;
                tracing_appender::non_blocking(appender)
            }
            other => anyhow::bail!("Invalid output configuration: {}", other),
        };

        let fmt_layer = match config.format.as_str() {
            "json" => fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_target(true)
                .boxed(),
            "text" => fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .boxed(),
            other => anyhow::bail!("Invalid format configuration: {}", other),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize tracing subscriber")?;

        tracing::debug!(
            level = %config.level,
            format = %config.format,
            output = %config.output,
            "Logging initialized"
        );

        Ok(Logger { _guard: guard })
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {}", level),
    }
}

/// File writer that rotates `name` → `name.1` → ... → `name.N` once the
/// current file would exceed `max_file_size`
pub struct RollingFileAppender {
    directory: PathBuf,
    filename: String,
    max_file_size: usize,
    max_backups: usize,
    current: Option<File>,
    current_size: usize,
}

impl RollingFileAppender {
    pub fn new(directory: PathBuf, filename: String, max_file_size: usize, max_backups: usize) -> Self {
        Self {
            directory,
            filename,
            max_file_size,
            max_backups,
            current: None,
            current_size: 0,
        }
    }

    fn for_path(log_file: &Path, max_file_size: usize, max_backups: usize) -> Result<Self> {
        let directory = log_file.parent()
            .context("Log file must have a parent directory")?;

        let filename = log_file.file_name()
            .context("Log file must have a filename")?
            .to_str()
            .context("Log filename must be valid UTF-8")?;

        Ok(Self::new(directory.to_path_buf(), filename.to_string(), max_file_size, max_backups))
    }

    fn current_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.directory.join(format!("{}.{}", self.filename, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.current = None;

        for i in (1..self.max_backups).rev() {
            let from = self.backup_path(i);
            if from.exists() {
                std::fs::rename(&from, self.backup_path(i + 1))?;
            }
        }

        let current = self.current_path();
        if current.exists() {
            std::fs::rename(&current, self.backup_path(1))?;
        }

        self.current_size = 0;
        Ok(())
    }

    fn file(&mut self) -> io::Result<&mut File> {
        if self.current.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.current_path())?;
            self.current_size = file.metadata()?.len() as usize;
            self.current = Some(file);
        }
        self.current
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file unavailable"))
    }
}

impl Write for RollingFileAppender {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Opening first loads the size of a pre-existing file
        self.file()?;
        if self.current_size > 0 && self.current_size + buf.len() > self.max_file_size {
            self.rotate()?;
        }

        let written = self.file()?.write(buf)?;
        self.current_size += written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.current.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}
