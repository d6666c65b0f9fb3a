//! Process-level configuration, read once at startup.

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "TICKETSORT_MODEL";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for the hosted chat-completion model.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub api_key: String,
    pub model: String,
    /// API root without trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
}

impl ModelSettings {
    /// Load from the process environment.
    ///
    /// A missing or empty `OPENAI_API_KEY` is an error; callers treat it as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let model = non_empty(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_api_key_is_error() {
        let err = ModelSettings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(API_KEY_VAR)));
        assert_eq!(err.to_string(), "OPENAI_API_KEY environment variable not set");
    }

    #[test]
    fn blank_api_key_is_error() {
        let result = ModelSettings::from_lookup(lookup(&[(API_KEY_VAR, "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn defaults_applied() {
        let s = ModelSettings::from_lookup(lookup(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(s.api_key, "sk-test");
        assert_eq!(s.model, DEFAULT_MODEL);
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn overrides_applied_and_slash_trimmed() {
        let s = ModelSettings::from_lookup(lookup(&[
            (API_KEY_VAR, "sk-test"),
            (MODEL_VAR, "gpt-4o"),
            (BASE_URL_VAR, "http://localhost:8080/v1/"),
        ]))
        .unwrap();
        assert_eq!(s.model, "gpt-4o");
        assert_eq!(s.base_url, "http://localhost:8080/v1");

        let s = s.with_base_url("http://proxy/v1//");
        assert_eq!(s.base_url, "http://proxy/v1");
    }

    #[test]
    fn debug_redacts_api_key() {
        let s = ModelSettings::from_lookup(lookup(&[(API_KEY_VAR, "sk-secret")])).unwrap();
        let dbg = format!("{s:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("gpt-4o-mini"));
    }
}
