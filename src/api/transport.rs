//! HTTP transport seam
//!
//! A transport performs exactly one request. It returns `Ok` for every
//! response the server sent, whatever the status, and `Err(NetworkError)`
//! only when no response was received.

use crate::core::config::ApiConfig;
use crate::core::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::time::Duration;

/// HTTP header carrying the bearer token
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// HTTP header carrying the per-request trace ID
pub const TRACE_ID_HEADER: &str = "X-Trace-Id";

/// An outgoing request, addressed relative to the API prefix
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(Method::POST, path);
        request.body = Some(body);
        request
    }

    /// Add a query parameter; empty values are left out
    pub fn query_opt(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replace any existing value of `name`
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn authorization(&self) -> Option<&str> {
        self.header(AUTHORIZATION_HEADER)
    }

    pub fn set_bearer(&mut self, token: &str) {
        self.set_header(AUTHORIZATION_HEADER, bearer(token));
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// A response as received; bodies that are not JSON are kept as a string
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by a shared `reqwest` client
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| ClientError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                config.api_prefix.trim_end_matches('/')
            ),
        })
    }

    fn url_for(&self, request: &HttpRequest) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))
            .map_err(|e| ClientError::ConfigError(format!("Invalid request URL: {}", e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = self.url_for(request)?;

        let mut builder = self.client.request(request.method.clone(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(format!("No response received: {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse::new(status, parse_body(&text)))
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
