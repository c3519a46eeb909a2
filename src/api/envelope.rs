//! Unwrapping of the `{ success, data, error }` response envelope
//!
//! Older backend builds answer some endpoints with the payload itself instead
//! of an envelope. Such a bare object is accepted when it carries at least one
//! field the payload type recognizes.

use crate::core::error::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Payload types that may arrive without an envelope
pub trait DirectPayload: DeserializeOwned {
    /// Top-level field names that identify a bare payload of this type
    const FIELDS: &'static [&'static str];
}

/// Whether the body is an envelope, i.e. an object with a `success` key
pub fn is_envelope(body: &Value) -> bool {
    body.as_object().map_or(false, |o| o.contains_key("success"))
}

/// `error.message` of an envelope, when present and non-empty
pub fn error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Unwrap an envelope, falling back to a bare payload of `T`
pub fn unwrap_envelope<T: DirectPayload>(body: Value, default_message: &str) -> Result<T> {
    match body {
        Value::Object(object) if object.contains_key("success") => unwrap_object(object, default_message),
        Value::Object(object) if T::FIELDS.iter().any(|f| object.contains_key(*f)) => {
            tracing::debug!("Accepting response without envelope");
            decode(Value::Object(object))
        }
        other => Err(ClientError::InvalidResponseFormat(format!(
            "expected an envelope, got {}",
            describe(&other)
        ))),
    }
}

/// Unwrap a response that must be an envelope
pub fn unwrap_data<T: DeserializeOwned>(body: Value, default_message: &str) -> Result<T> {
    match body {
        Value::Object(object) if object.contains_key("success") => unwrap_object(object, default_message),
        other => Err(ClientError::InvalidResponseFormat(format!(
            "expected an envelope, got {}",
            describe(&other)
        ))),
    }
}

fn unwrap_object<T: DeserializeOwned>(mut object: Map<String, Value>, default_message: &str) -> Result<T> {
    let success = object.get("success").and_then(Value::as_bool).unwrap_or(false);

    if !success {
        let message = error_message(&Value::Object(object))
            .unwrap_or_else(|| default_message.to_string());
        return Err(ClientError::ApiError(message));
    }

    match object.remove("data") {
        Some(Value::Null) | None => Err(ClientError::InvalidResponseFormat(
            "envelope reports success but carries no data".to_string(),
        )),
        Some(data) => decode(data),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ClientError::InvalidResponseFormat(e.to_string()))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty body",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a non-JSON or string body",
        Value::Array(_) => "an array",
        Value::Object(_) => "an unrecognized object",
    }
}
