//! Category resolution for support tickets.
//!
//! Builds a constrained prompt from the caller's categories, asks the model
//! for one label with greedy decoding, then maps the reply onto the set via
//! the [`rules`](crate::rules) chain. The returned category is always a member
//! of the input set; only a failed model call produces an error.

use std::fmt::Write as _;
use std::sync::Arc;

use ticketsort_core::{Category, CategorySet};
use tracing::{debug, info};

use crate::model::{ChatMessage, ChatModel, CompletionRequest, ModelError};
use crate::rules::{self, MatchRule};

/// Output ceiling: enough for one label, not for prose.
pub const MAX_OUTPUT_TOKENS: u32 = 25;

/// Greedy decoding keeps classification reproducible.
pub const TEMPERATURE: f32 = 0.0;

pub const SYSTEM_PROMPT: &str = "You are a strict classifier. You must respond with exactly one \
of the provided category names. Never create new categories or modify the given names.";

/// Resolved category plus how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub category: &'a Category,
    pub rule: MatchRule,
    /// Model reply after normalization.
    pub output: String,
    pub tokens_used: u32,
}

/// Resolves one category per ticket description using a chat model.
#[derive(Clone)]
pub struct CategoryResolver {
    model: Arc<dyn ChatModel>,
}

impl CategoryResolver {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<dyn ChatModel> {
        &self.model
    }

    /// Pick the best-matching category for `description`.
    pub async fn resolve<'a>(
        &self,
        description: &str,
        categories: &'a CategorySet,
    ) -> Result<&'a Category, ModelError> {
        Ok(self.resolve_detailed(description, categories).await?.category)
    }

    /// Like [`resolve`](Self::resolve), also reporting the rule that fired.
    ///
    /// Model-call errors are returned as-is; the caller decides how to surface them.
    pub async fn resolve_detailed<'a>(
        &self,
        description: &str,
        categories: &'a CategorySet,
    ) -> Result<Resolution<'a>, ModelError> {
        let fallback = categories.fallback();

        let request = build_request(description, categories);
        let completion = self.model.complete(request).await?;
        debug!(raw = %completion.text, "model reply");

        let output = rules::normalize_output(&completion.text);
        let (category, rule) = rules::select(output, categories, fallback);

        info!(
            model = %self.model.model_id(),
            rule = %rule,
            label = %category.label,
            tokens = completion.tokens_used,
            "ticket classified"
        );

        Ok(Resolution {
            category,
            rule,
            output: output.to_string(),
            tokens_used: completion.tokens_used,
        })
    }
}

/// Numbered category list, one `"{n}. {label}"` per line, 1-indexed.
pub fn numbered_labels(categories: &CategorySet) -> String {
    let mut out = String::new();
    for (i, cat) in categories.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}. {}", i + 1, cat.label);
    }
    out
}

pub fn build_user_prompt(description: &str, categories: &CategorySet) -> String {
    format!(
        "You must classify this query into ONE of these exact categories:\n\
         \n\
         {categories}\n\
         \n\
         Rules:\n\
         - You MUST respond with the COMPLETE and EXACT category name from the list above\n\
         - Do NOT abbreviate, modify, or rephrase the category names\n\
         - Do NOT add quotes or extra text\n\
         - If unsure, choose the closest match or \"Other\"\n\
         \n\
         Query: {description}\n\
         \n\
         Selected Category:",
        categories = numbered_labels(categories),
    )
}

pub fn build_request(description: &str, categories: &CategorySet) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_user_prompt(description, categories)),
        ],
        max_tokens: MAX_OUTPUT_TOKENS,
        temperature: TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Completion, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed text (or error) and records every request.
    struct ScriptedModel {
        reply: Result<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(msg.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        fn model_id(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: CompletionRequest) -> Result<Completion, ModelError> {
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(Completion {
                    text: text.clone(),
                    tokens_used: 3,
                }),
                Err(msg) => Err(ModelError::Other(msg.clone())),
            }
        }
    }

    fn set(labels: &[&str]) -> CategorySet {
        CategorySet::new(
            labels
                .iter()
                .enumerate()
                .map(|(i, l)| Category::new(i as u64 + 1, *l))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn numbered_list_is_one_indexed_in_order() {
        let cats = set(&["Billing", "Internet & Phone", "Other"]);
        assert_eq!(
            numbered_labels(&cats),
            "1. Billing\n2. Internet & Phone\n3. Other"
        );
    }

    #[test]
    fn user_prompt_embeds_list_and_query() {
        let cats = set(&["Billing", "Other"]);
        let prompt = build_user_prompt("I was charged twice", &cats);
        assert!(prompt.starts_with(
            "You must classify this query into ONE of these exact categories:\n\n1. Billing\n2. Other\n\nRules:\n"
        ));
        assert!(prompt.contains("- Do NOT add quotes or extra text\n"));
        assert!(prompt.contains("choose the closest match or \"Other\""));
        assert!(prompt.ends_with("Query: I was charged twice\n\nSelected Category:"));
    }

    #[test]
    fn request_uses_greedy_decoding_and_small_ceiling() {
        let cats = set(&["Billing", "Other"]);
        let req = build_request("help", &cats);
        assert_eq!(req.max_tokens, 25);
        assert_eq!(req.temperature, 0.0);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert!(req.messages[0].content.contains("strict classifier"));
        assert_eq!(req.messages[1].role, Role::User);
    }

    #[tokio::test]
    async fn exact_reply_returns_that_category() {
        let model = ScriptedModel::replying("Billing");
        let resolver = CategoryResolver::new(model.clone());
        let cats = set(&["Billing", "Other"]);

        let res = resolver
            .resolve_detailed("I was charged twice", &cats)
            .await
            .unwrap();
        assert_eq!(res.category, &Category::new(1u64, "Billing"));
        assert_eq!(res.rule, MatchRule::Exact);
        assert_eq!(res.tokens_used, 3);
        assert_eq!(model.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn every_label_resolves_to_itself_when_echoed() {
        let cats = set(&["Billing", "Internet & Phone", "Account Access", "Other"]);
        for cat in &cats {
            let resolver = CategoryResolver::new(ScriptedModel::replying(&cat.label.to_uppercase()));
            let got = resolver.resolve("anything", &cats).await.unwrap();
            assert!(std::ptr::eq(got, cat), "label {}", cat.label);
        }
    }

    #[tokio::test]
    async fn unmatched_reply_falls_back_to_other() {
        let resolver = CategoryResolver::new(ScriptedModel::replying("Refund request"));
        let cats = set(&["Billing", "Other"]);
        let res = resolver.resolve_detailed("money back", &cats).await.unwrap();
        assert_eq!(res.category.label, "Other");
        assert_eq!(res.rule, MatchRule::Fallback);
    }

    #[tokio::test]
    async fn resolution_is_idempotent() {
        let resolver = CategoryResolver::new(ScriptedModel::replying("wifi issues"));
        let cats = set(&["Billing", "Internet & Phone", "Other"]);
        let first = resolver.resolve("no signal", &cats).await.unwrap();
        let second = resolver.resolve("no signal", &cats).await.unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.label, "Internet & Phone");
    }

    #[tokio::test]
    async fn model_error_propagates() {
        let resolver = CategoryResolver::new(ScriptedModel::failing("connection reset"));
        let cats = set(&["Billing", "Other"]);
        let err = resolver.resolve("help", &cats).await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }
}
