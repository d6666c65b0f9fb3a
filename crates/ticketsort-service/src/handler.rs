use async_trait::async_trait;
use serde_json::Value;
use ticketsort_core::Envelope;

/// One routable service.
///
/// A handler validates its own `data` shape and converts every failure into
/// an [`Envelope`]; errors never escape as `Err`.
#[async_trait]
pub trait ServiceHandler: Send + Sync {
    async fn handle(&self, data: Value) -> Envelope;
}
