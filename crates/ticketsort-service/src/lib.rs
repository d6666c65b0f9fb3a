//! Service layer: request dispatcher, service handlers, and process startup.

pub mod dispatch;
mod handler;
pub mod support;

use std::sync::Arc;

use ticketsort_ai::{CategoryResolver, ChatModel};
use ticketsort_core::request::HELP_AND_SUPPORT;

pub use dispatch::Dispatcher;
pub use handler::ServiceHandler;
pub use support::HelpAndSupportHandler;

/// Build the dispatcher with every registered service backed by `model`.
pub fn router(model: Arc<dyn ChatModel>) -> Dispatcher {
    let resolver = CategoryResolver::new(model);
    Dispatcher::new().with_route(
        HELP_AND_SUPPORT,
        Arc::new(HelpAndSupportHandler::new(resolver)),
    )
}

/// One-time process initialization against the hosted model.
///
/// Fails if `OPENAI_API_KEY` is unset; that failure is meant to abort startup.
/// On success a warmup request is already running in the background.
#[cfg(feature = "openai")]
pub fn bootstrap() -> anyhow::Result<Dispatcher> {
    use anyhow::Context;
    use ticketsort_core::ModelSettings;

    let settings = ModelSettings::from_env().context("loading model settings")?;
    Ok(bootstrap_with(&settings))
}

/// Like [`bootstrap`], with explicit settings.
#[cfg(feature = "openai")]
pub fn bootstrap_with(settings: &ticketsort_core::ModelSettings) -> Dispatcher {
    let model: Arc<dyn ChatModel> = Arc::new(ticketsort_ai::OpenAiClient::new(settings));
    tracing::info!(model = %settings.model, base_url = %settings.base_url, "model client ready");

    ticketsort_ai::spawn_warmup(model.clone());
    router(model)
}
