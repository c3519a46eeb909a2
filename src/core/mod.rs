//! Core application module
//!
//! This module provides the core application layer including:
//! - Dashboard data services
//! - Configuration management
//! - Structured logging system
//! - Error handling and type system
//! - Local key-value storage for the session

pub mod services;
pub mod config;
pub mod logging;
pub mod error;
pub mod storage;

pub use services::DashboardService;
pub use config::{CliArgs, Command, Config};
pub use logging::Logger;
pub use error::{ClientError, ErrorContext, ErrorSummary, Result};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
