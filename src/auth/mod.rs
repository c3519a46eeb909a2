//! Authentication module
//!
//! This module provides the client session including:
//! - Login and refresh wire models
//! - The persisted session fields
//! - The session store with login, logout and token refresh

pub mod models;
pub mod session;
pub mod store;

pub use session::{Session, SessionState};
pub use store::SessionStore;
