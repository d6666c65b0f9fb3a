//! Category resolution: chat-completion model port, hosted client, and the rule chain
//! that turns model output into a guaranteed-valid category.

pub mod model;
pub mod resolver;
pub mod rules;
pub mod warmup;

#[cfg(feature = "openai")]
mod openai;
#[cfg(feature = "openai")]
pub use openai::OpenAiClient;

pub use model::{ChatMessage, ChatModel, Completion, CompletionRequest, ModelError, Role};
pub use resolver::{CategoryResolver, Resolution};
pub use rules::MatchRule;
pub use warmup::{spawn_warmup, warmup};
