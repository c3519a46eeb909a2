//! Scripted transport for unit tests

use crate::api::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::core::error::{ClientError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

struct Outcome {
    /// When set, the response is held back until the gate is notified
    gate: Option<Arc<Notify>>,
    result: Result<HttpResponse>,
}

/// Replays queued outcomes in order and records every request it sees
#[derive(Default)]
pub struct MockTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, gate: Option<Arc<Notify>>, result: Result<HttpResponse>) {
        self.outcomes.lock().unwrap().push_back(Outcome { gate, result });
    }

    pub fn push_response(&self, status: u16, body: Value) {
        self.push(None, Ok(HttpResponse::new(status, body)));
    }

    /// Queue a response that is only delivered after the returned gate is notified
    pub fn push_held_response(&self, status: u16, body: Value) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(Some(gate.clone()), Ok(HttpResponse::new(status, body)));
        gate
    }

    pub fn push_network_error(&self, message: &str) {
        self.push(None, Err(ClientError::NetworkError(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let outcome = {
            self.requests.lock().unwrap().push(request.clone());
            self.outcomes.lock().unwrap().pop_front()
        };

        match outcome {
            Some(Outcome { gate, result }) => {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                result
            }
            None => Err(ClientError::NetworkError(format!(
                "no scripted response for {}",
                request.path
            ))),
        }
    }
}
