//! Uniform response envelope and the HTTP response that carries it.
//!
//! Every outcome, success or failure, leaves the service as an [`HttpResponse`]
//! whose `body` is the JSON-encoded [`Envelope`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Headers attached to every response.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

/// `{success, statusCode, message, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    pub fn ok(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            status_code: STATUS_OK,
            message: message.into(),
            data,
        }
    }

    /// Failure envelope with an empty `data` object.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code,
            message: message.into(),
            data: Value::Object(Map::new()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(STATUS_BAD_REQUEST, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::error(STATUS_INTERNAL_ERROR, message)
    }

    /// Wrap this envelope into the outgoing HTTP response.
    pub fn into_response(self) -> HttpResponse {
        // Serialising a struct of plain strings and `Value`s cannot fail.
        let body = serde_json::to_string(&self).unwrap_or_default();
        HttpResponse {
            status_code: self.status_code,
            headers: default_headers(),
            body,
        }
    }
}

/// API-gateway style response: `{statusCode, headers, body}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Decode the envelope carried in `body`.
    pub fn envelope(&self) -> serde_json::Result<Envelope> {
        serde_json::from_str(&self.body)
    }
}

pub fn default_headers() -> BTreeMap<String, String> {
    DEFAULT_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
