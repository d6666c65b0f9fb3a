//! AWS Lambda runtime loop.

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use ticketsort_core::{HttpResponse, ModelSettings};
use tracing::info;

/// Initialize once per container, then serve invocations until the runtime stops.
///
/// The dispatcher (and the model client behind it) is shared by every
/// invocation the container handles; warmup starts before the first one.
pub async fn serve(settings: &ModelSettings) -> anyhow::Result<()> {
    let dispatcher = Arc::new(ticketsort_service::bootstrap_with(settings));
    info!(routes = ?dispatcher.request_types(), "starting lambda runtime");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let dispatcher = dispatcher.clone();
        async move {
            info!(request_id = %event.context.request_id, "invocation");
            Ok::<HttpResponse, Error>(dispatcher.handle_event(event.payload).await)
        }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}
