//! Backend API access
//!
//! This module provides the client side of the REST API including:
//! - The HTTP transport seam and its reqwest implementation
//! - The plain client carrying the default authorization header
//! - The refresh-on-401 interceptor
//! - Response envelope unwrapping and typed response models

pub mod transport;
pub mod http;
pub mod interceptor;
pub mod envelope;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TRACE_ID_HEADER};
pub use http::HttpClient;
pub use interceptor::ApiClient;
pub use envelope::{unwrap_envelope, DirectPayload};
pub use models::{CalendarData, MainPageData};
