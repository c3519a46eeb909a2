use crate::api::transport::{bearer, HttpRequest, HttpResponse, HttpTransport, AUTHORIZATION_HEADER, TRACE_ID_HEADER};
use crate::core::error::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug_span, Instrument};
use uuid::Uuid;

/// Plain HTTP client shared by the session store and the interceptor.
///
/// Holds the process-wide default `Authorization` value, applied to every
/// request that does not carry its own. Writers are login, refresh and
/// logout; last writer wins.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn HttpTransport>,
    default_authorization: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            default_authorization: Arc::new(RwLock::new(None)),
        }
    }

    /// Install `Bearer <token>` as the default, or clear it with `None`
    pub async fn set_default_token(&self, token: Option<&str>) {
        *self.default_authorization.write().await = token.map(bearer);
    }

    pub async fn default_authorization(&self) -> Option<String> {
        self.default_authorization.read().await.clone()
    }

    /// Send one request. Only fails when no response was received.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        if request.authorization().is_none() {
            if let Some(value) = self.default_authorization().await {
                request.set_header(AUTHORIZATION_HEADER, value);
            }
        }

        let trace_id = Uuid::new_v4().to_string();
        request.set_header(TRACE_ID_HEADER, trace_id.clone());

        let span = debug_span!(
            "http_request",
            trace_id = %trace_id,
            method = %request.method,
            path = %request.path,
        );

        async move {
            tracing::debug!("Request started");
            let result = self.transport.send(&request).await;
            match &result {
                Ok(response) => tracing::debug!(status = response.status, "Request completed"),
                Err(e) => tracing::debug!(error = %e, "Request failed without response"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
