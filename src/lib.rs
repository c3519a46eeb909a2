//! MTSSBJ Dashboard Client Library
//!
//! This library provides the client side of the MTSSBJ dashboard, including
//! session management with token refresh, typed API access, the menu tree
//! and the terminal views.

pub mod api;
pub mod app;
pub mod auth;
pub mod core;
pub mod menu;
pub mod views;

// Re-export commonly used types
pub use api::{ApiClient, HttpClient, ReqwestTransport};
pub use app::AppContext;
pub use auth::{SessionState, SessionStore};
pub use crate::core::{ClientError, Config, DashboardService, Result};
pub use menu::{build_menu_tree, MenuItem, MenuNode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
