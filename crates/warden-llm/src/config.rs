//! Provider configuration, built-in provider definitions and model routing.
//!
//! Each [`LlmProviderConfig`] describes how to reach one OpenAI-compatible
//! endpoint. [`route_model`] picks the provider for a prefixed model name
//! such as `anthropic/claude-3-5-sonnet-20241022`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration for a single provider endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Provider name (e.g. "anthropic", "openai").
    pub name: String,

    /// Base URL of the OpenAI-compatible API (e.g. "https://api.openai.com/v1").
    pub base_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Prefix that routes a model name to this provider (e.g. "anthropic/").
    /// The prefix is stripped before the request is sent.
    #[serde(default)]
    pub model_prefix: Option<String>,

    /// Extra HTTP headers sent with every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request timeout in seconds. Defaults to 120.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Returns the built-in provider configurations.
///
/// The first entry is the fallback for unprefixed model names.
pub fn builtin_providers() -> Vec<LlmProviderConfig> {
    vec![
        LlmProviderConfig {
            name: "anthropic".into(),
            base_url: "https://api.anthropic.com/v1".into(),
            api_key_env: "ANTHROPIC_API_KEY".into(),
            model_prefix: Some("anthropic/".into()),
            headers: HashMap::from([("anthropic-version".into(), "2023-06-01".into())]),
            timeout_secs: None,
        },
        LlmProviderConfig {
            name: "openai".into(),
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            model_prefix: Some("openai/".into()),
            headers: HashMap::new(),
            timeout_secs: None,
        },
        LlmProviderConfig {
            name: "groq".into(),
            base_url: "https://api.groq.com/openai/v1".into(),
            api_key_env: "GROQ_API_KEY".into(),
            model_prefix: Some("groq/".into()),
            headers: HashMap::new(),
            timeout_secs: None,
        },
        LlmProviderConfig {
            name: "mistral".into(),
            base_url: "https://api.mistral.ai/v1".into(),
            api_key_env: "MISTRAL_API_KEY".into(),
            model_prefix: Some("mistral/".into()),
            headers: HashMap::new(),
            timeout_secs: None,
        },
    ]
}

/// Route a model name to a provider, returning a copy of the provider's
/// config and the model name with the prefix stripped.
///
/// Prefixes are matched longest-first. An unprefixed name goes to the
/// first config unchanged. Returns `None` only when `configs` is empty.
pub fn route_model(model: &str, configs: &[LlmProviderConfig]) -> Option<(LlmProviderConfig, String)> {
    let mut prefixed: Vec<(&str, &LlmProviderConfig)> = configs
        .iter()
        .filter_map(|c| c.model_prefix.as_deref().map(|p| (p, c)))
        .collect();
    prefixed.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    for (prefix, config) in prefixed {
        if let Some(stripped) = model.strip_prefix(prefix) {
            return Some((config.clone(), stripped.to_string()));
        }
    }

    configs.first().map(|c| (c.clone(), model.to_string()))
}
