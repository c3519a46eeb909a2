//! Application context
//!
//! Wires transport, storage, session store and services together. Views and
//! the CLI receive their dependencies from here.

use crate::api::http::HttpClient;
use crate::api::interceptor::ApiClient;
use crate::api::transport::{HttpTransport, ReqwestTransport};
use crate::auth::SessionStore;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::services::DashboardService;
use crate::core::storage::{FileStorage, LocalStorage};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub dashboard: DashboardService,
}

impl AppContext {
    /// Build the context against the configured backend and session file
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.api)?);
        let session_path = config.storage.session_path();
        let storage = Arc::new(FileStorage::open(&session_path)?);

        tracing::debug!(
            base_url = %config.api.base_url,
            api_prefix = %config.api.api_prefix,
            session_file = %session_path.display(),
            "Application context configured"
        );

        Self::with_transport(transport, storage)
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>, storage: Arc<dyn LocalStorage>) -> Result<Self> {
        let session = Arc::new(SessionStore::new(HttpClient::new(transport), storage)?);
        let dashboard = DashboardService::new(ApiClient::new(session.clone()));
        Ok(Self { session, dashboard })
    }
}
