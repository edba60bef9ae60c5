//! OpenAI-compatible provider implementation.
//!
//! [`OpenAiCompatProvider`] talks to any endpoint that accepts the OpenAI
//! chat completion format: Anthropic's compatibility endpoint, OpenAI, Groq,
//! Mistral, or a local gateway.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::LlmProviderConfig;
use crate::error::{ProviderError, Result};
use crate::provider::Provider;
use crate::types::{ChatRequest, ChatResponse};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A provider that uses the OpenAI-compatible chat completion API.
///
/// ```rust,ignore
/// use warden_llm::{OpenAiCompatProvider, config::builtin_providers};
///
/// let anthropic = builtin_providers().remove(0);
/// let provider = OpenAiCompatProvider::new(anthropic);
/// ```
pub struct OpenAiCompatProvider {
    config: LlmProviderConfig,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl OpenAiCompatProvider {
    /// Create a provider whose API key is read from `config.api_key_env`
    /// at request time.
    pub fn new(config: LlmProviderConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            config,
            http,
            api_key: None,
        }
    }

    /// Create a provider with an explicit API key, bypassing the
    /// environment variable.
    pub fn with_api_key(config: LlmProviderConfig, api_key: String) -> Self {
        let mut provider = Self::new(config);
        provider.api_key = Some(api_key);
        provider
    }

    fn completions_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    /// Explicit key > environment variable. Resolved lazily so a missing
    /// key only fails the requests that actually reach the backend.
    fn resolve_api_key(&self) -> Result<String> {
        if let Some(ref key) = self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!("set {} env var", self.config.api_key_env))
            })
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let api_key = self.resolve_api_key()?;
        let url = self.completions_url();

        debug!(
            provider = %self.config.name,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let mut req = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json");

        for (k, v) in &self.config.headers {
            req = req.header(k.as_str(), v.as_str());
        }

        let response = req.json(request).send().await.map_err(map_send_error)?;
        let status = response.status();

        if !status.is_success() {
            if status.as_u16() == 429 {
                let header_ms = parse_retry_after_header(&response);
                let body = response.text().await.unwrap_or_default();
                let retry_ms = header_ms
                    .or_else(|| parse_retry_after_ms(&body))
                    .unwrap_or(1000);
                warn!(
                    provider = %self.config.name,
                    retry_after_ms = retry_ms,
                    "rate limited"
                );
                return Err(ProviderError::RateLimited {
                    retry_after_ms: retry_ms,
                });
            }

            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body).unwrap_or(body);

            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthFailed(message),
                404 => ProviderError::ModelNotFound(format!("model '{}': {message}", request.model)),
                _ => ProviderError::RequestFailed(format!("HTTP {status}: {message}")),
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;

        debug!(
            provider = %self.config.name,
            model = %chat_response.model,
            choices = chat_response.choices.len(),
            "chat completion response received"
        );

        Ok(chat_response)
    }
}

fn map_send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Http(err)
    }
}

/// Pull `error.message` (or a bare `error` string) out of an error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error").and_then(|v| {
        v.get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .or_else(|| v.as_str().map(String::from))
    })
}

/// Numeric `Retry-After` header, in milliseconds.
fn parse_retry_after_header(response: &reqwest::Response) -> Option<u64> {
    let header_val = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())?;
    header_val
        .parse::<f64>()
        .ok()
        .map(|secs| (secs * 1000.0).max(0.0) as u64)
}

/// `retry_after_ms` or `retry_after` (seconds) from a JSON error body.
fn parse_retry_after_ms(body: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("retry_after_ms")
        .and_then(|v| v.as_u64())
        .or_else(|| {
            value
                .get("retry_after")
                .and_then(|v| v.as_f64())
                .map(|secs| (secs * 1000.0) as u64)
        })
}

impl std::fmt::Debug for OpenAiCompatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatProvider")
            .field("name", &self.config.name)
            .field("base_url", &self.config.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_config() -> LlmProviderConfig {
        LlmProviderConfig {
            name: "test-provider".into(),
            base_url: "https://api.example.com/v1/".into(),
            api_key_env: "WARDEN_TEST_PROVIDER_KEY_UNSET".into(),
            model_prefix: Some("test/".into()),
            headers: HashMap::new(),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn completions_url_strips_trailing_slash() {
        let provider = OpenAiCompatProvider::new(test_config());
        assert_eq!(
            provider.completions_url(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn explicit_key_wins() {
        let provider = OpenAiCompatProvider::with_api_key(test_config(), "sk-explicit".into());
        assert_eq!(provider.resolve_api_key().unwrap(), "sk-explicit");
    }

    #[test]
    fn missing_key_is_not_configured() {
        let provider = OpenAiCompatProvider::new(test_config());
        let err = provider.resolve_api_key().unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains("WARDEN_TEST_PROVIDER_KEY_UNSET"));
    }

    #[test]
    fn key_from_env() {
        let mut config = test_config();
        config.api_key_env = "WARDEN_TEST_PROVIDER_KEY_SET".into();
        temp_env::with_var("WARDEN_TEST_PROVIDER_KEY_SET", Some("sk-env"), || {
            let provider = OpenAiCompatProvider::new(config.clone());
            assert_eq!(provider.resolve_api_key().unwrap(), "sk-env");
        });
    }

    #[test]
    fn debug_hides_key() {
        let provider = OpenAiCompatProvider::with_api_key(test_config(), "sk-secret".into());
        let dbg = format!("{provider:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("***"));
    }

    #[test]
    fn extract_error_message_formats() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"bad key","type":"auth"}}"#).as_deref(),
            Some("bad key")
        );
        assert_eq!(
            extract_error_message(r#"{"error":"plain"}"#).as_deref(),
            Some("plain")
        );
        assert!(extract_error_message("not json").is_none());
    }

    #[test]
    fn retry_after_from_body() {
        assert_eq!(parse_retry_after_ms(r#"{"retry_after_ms": 1500}"#), Some(1500));
        assert_eq!(parse_retry_after_ms(r#"{"retry_after": 2.5}"#), Some(2500));
        assert_eq!(parse_retry_after_ms("{}"), None);
    }
}
