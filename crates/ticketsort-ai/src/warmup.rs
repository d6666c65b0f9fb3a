//! Cold-start warmup: one tiny completion so the first real ticket is not
//! the one paying for connection setup.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::model::{ChatMessage, ChatModel, CompletionRequest};

pub const WARMUP_PROMPT: &str = "hi";

/// Issue a one-token completion. Returns whether it succeeded; never fails.
pub async fn warmup(model: &dyn ChatModel) -> bool {
    let request = CompletionRequest {
        messages: vec![ChatMessage::user(WARMUP_PROMPT)],
        max_tokens: 1,
        temperature: 0.0,
    };
    match model.complete(request).await {
        Ok(_) => {
            debug!(model = %model.model_id(), "warmup complete");
            true
        }
        Err(e) => {
            debug!(model = %model.model_id(), error = %e, "warmup failed, ignoring");
            false
        }
    }
}

/// Run [`warmup`] on a detached task so startup never waits on it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_warmup(model: Arc<dyn ChatModel>) -> JoinHandle<bool> {
    tokio::spawn(async move { warmup(model.as_ref()).await })
}
