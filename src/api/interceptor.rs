//! Authenticated API client with refresh-on-401
//!
//! Each request is driven by an explicit attempt counter. A 401 on the first
//! attempt triggers one token refresh and one retry with the new bearer
//! token; a 401 on the retry, or a failed refresh, surfaces the original
//! unauthorized error.

use crate::api::envelope;
use crate::api::http::HttpClient;
use crate::api::transport::{HttpRequest, HttpResponse};
use crate::auth::SessionStore;
use crate::core::error::{ClientError, Result};
use std::sync::Arc;

/// Refresh-and-retry cycles allowed per request
pub const MAX_AUTH_RETRIES: u32 = 1;

const UNAUTHORIZED: u16 = 401;

#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            http: session.http().clone(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Send a request, refreshing the session once on 401.
    ///
    /// Non-2xx responses are returned as `ServerError`.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut request = request;
        let mut attempt: u32 = 0;

        loop {
            let response = self.http.send(request.clone()).await?;

            if response.status != UNAUTHORIZED || attempt >= MAX_AUTH_RETRIES {
                return into_result(response);
            }
            attempt += 1;

            tracing::info!(path = %request.path, attempt, "Unauthorized response, refreshing session");

            if !self.session.refresh_access_token().await {
                return into_result(response);
            }

            match self.session.access_token().await {
                Some(token) => request.set_bearer(&token),
                None => return into_result(response),
            }
        }
    }
}

fn into_result(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let message = envelope::error_message(&response.body)
        .unwrap_or_else(|| format!("request failed with status {}", response.status));
    Err(ClientError::ServerError {
        status: response.status,
        message,
    })
}
