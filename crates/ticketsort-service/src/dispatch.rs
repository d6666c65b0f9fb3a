//! Request dispatcher: maps a request's `type` tag to its [`ServiceHandler`].
//!
//! Adding a service means registering one more handler; each handler owns
//! validation of its own `data`.

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use ticketsort_core::{Envelope, HttpResponse, parse_event};
use tracing::{error, info, warn};

use crate::handler::ServiceHandler;

#[derive(Default, Clone)]
pub struct Dispatcher {
    routes: HashMap<String, Arc<dyn ServiceHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `request_type`, replacing any previous entry.
    pub fn register(
        &mut self,
        request_type: impl Into<String>,
        handler: Arc<dyn ServiceHandler>,
    ) -> &mut Self {
        self.routes.insert(request_type.into(), handler);
        self
    }

    pub fn with_route(
        mut self,
        request_type: impl Into<String>,
        handler: Arc<dyn ServiceHandler>,
    ) -> Self {
        self.register(request_type, handler);
        self
    }

    /// Registered request types, sorted.
    pub fn request_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Parse `event` and route it. Every outcome is an [`Envelope`].
    pub async fn dispatch(&self, event: &Value) -> Envelope {
        let request = match parse_event(event) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = ?e, "rejecting event");
                return Envelope::bad_request(e.to_string());
            }
        };

        let Some(handler) = self.routes.get(&request.request_type) else {
            warn!(request_type = %request.request_type, "unsupported request type");
            return Envelope::bad_request(format!(
                "Unsupported request type: {}",
                request.request_type
            ));
        };

        handler.handle(request.data).await
    }

    /// Outermost boundary: dispatch `event` and wrap the result as an HTTP response.
    ///
    /// A panic inside a handler becomes a 500 `Unexpected error` response.
    pub async fn handle_event(&self, event: Value) -> HttpResponse {
        let envelope = match AssertUnwindSafe(self.dispatch(&event)).catch_unwind().await {
            Ok(envelope) => envelope,
            Err(panic) => {
                let msg = panic_message(panic.as_ref());
                error!(panic = %msg, "handler panicked");
                Envelope::internal_error(format!("Unexpected error: {msg}"))
            }
        };

        info!(
            status = envelope.status_code,
            success = envelope.success,
            "request handled"
        );
        envelope.into_response()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
