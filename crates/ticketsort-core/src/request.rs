//! Inbound event parsing.
//!
//! Two invocation shapes are accepted:
//!
//! - a gateway envelope `{"body": "<json string>", ...}`, or
//! - a direct SDK call whose payload already is `{"type": ..., "data": ...}`.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::category::{Category, CategorySet};
use crate::error::RequestError;

/// Request type routed to the help-and-support ticket classifier.
pub const HELP_AND_SUPPORT: &str = "HELP_AND_SUPPORT";

/// A parsed `{type, data}` request, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    pub request_type: String,
    /// Handler-specific payload; `{}` when the caller sent none.
    pub data: Value,
}

/// Parse a raw invocation event into a [`ServiceRequest`].
pub fn parse_event(event: &Value) -> Result<ServiceRequest, RequestError> {
    let decoded;
    let body = match event.get("body") {
        Some(Value::String(raw)) => {
            decoded = serde_json::from_str::<Value>(raw)
                .map_err(|e| RequestError::InvalidBody(e.to_string()))?;
            &decoded
        }
        Some(other) => {
            return Err(RequestError::InvalidBody(format!(
                "expected a JSON-encoded string, found {}",
                json_kind(other)
            )));
        }
        None => event,
    };

    let request_type = match body.get("type") {
        Some(v) if is_truthy(v) => match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => return Err(RequestError::MissingType),
    };

    let data = match body.get("data") {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(v) => v.clone(),
    };

    tracing::debug!(request_type = %request_type, "parsed service request");
    Ok(ServiceRequest { request_type, data })
}

/// Payload of a `HELP_AND_SUPPORT` request as sent by the caller.
///
/// Every field is optional at this stage; [`HelpAndSupportData::validate`]
/// enforces presence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelpAndSupportData {
    /// Any JSON value; never inspected, so it cannot reject a request.
    #[serde(default)]
    pub membership_type: Option<Value>,
    #[serde(default)]
    pub options: Option<Vec<Category>>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated classification request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRequest {
    /// Carried through for logging; not used by matching.
    pub membership_type: Option<Value>,
    pub categories: CategorySet,
    pub description: String,
}

impl HelpAndSupportData {
    pub fn from_value(data: Value) -> serde_json::Result<Self> {
        serde_json::from_value(data)
    }

    /// `None` when `description` or `options` is missing or empty.
    pub fn validate(self) -> Option<ClassificationRequest> {
        let description = self.description.filter(|d| !d.is_empty())?;
        let categories = CategorySet::new(self.options?).ok()?;
        Some(ClassificationRequest {
            membership_type: self.membership_type,
            categories,
            description,
        })
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
