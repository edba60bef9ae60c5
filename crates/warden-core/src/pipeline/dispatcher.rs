//! LLM-backed task dispatcher.
//!
//! Wraps the request text in a category-specific instruction preamble,
//! makes one JSON-mode completion call through a [`Provider`], and parses
//! the first returned content block as a JSON object.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use warden_llm::{ChatMessage, ChatRequest, Provider, ProviderError, ResponseFormat};
use warden_types::{ExecutionResult, TaskCategory};

use super::traits::TaskDispatcher;

/// Default completion budget per request.
pub const DEFAULT_MAX_TOKENS: i32 = 1024;

/// Why a dispatch produced no usable result.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The backend returned no choices, or the first one had no text.
    #[error("backend returned an empty response")]
    EmptyResponse,

    /// The first content block was not valid JSON.
    #[error("backend returned invalid JSON content: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The content parsed, but as an array, scalar or null.
    #[error("backend JSON response is not an object (got {kind})")]
    NotAnObject { kind: &'static str },

    /// Transport, authentication or configuration failure from the provider.
    #[error("backend call failed: {0}")]
    Backend(#[from] ProviderError),
}

const SUMMARIZATION_INSTRUCTIONS: &str = "\
You are an assistant that summarizes documents. Return a concise JSON object with the following shape:
{
  \"summary\": \"short paragraph summary\",
  \"key_points\": [\"bullet point 1\", \"bullet point 2\"]
}
Only return valid JSON.";

const EXTRACTION_INSTRUCTIONS: &str = "\
You are an assistant that extracts structured data from text. Return a JSON object describing the key fields you find, for example:
{
  \"fields\": {
    \"names\": [\"...\"],
    \"dates\": [\"...\"],
    \"amounts\": [\"...\"]
  }
}
Only return valid JSON.";

const GENERAL_QUERY_INSTRUCTIONS: &str = "\
You are a helpful assistant answering a general query. Return a JSON object with this shape:
{
  \"answer\": \"direct answer in natural language\",
  \"supporting_facts\": [\"fact 1\", \"fact 2\"]
}
Only return valid JSON.";

const UNCLASSIFIED_INSTRUCTIONS: &str = "\
You are a robust assistant handling an unclassified request. Return a JSON object that captures your best response, with this shape:
{
  \"answer\": \"your answer\",
  \"notes\": \"any caveats or assumptions\"
}
Only return valid JSON.";

/// Instruction preamble for a category.
pub fn instructions_for(category: TaskCategory) -> &'static str {
    match category {
        TaskCategory::DocumentSummarization => SUMMARIZATION_INSTRUCTIONS,
        TaskCategory::DataExtraction => EXTRACTION_INSTRUCTIONS,
        TaskCategory::GeneralQuery => GENERAL_QUERY_INSTRUCTIONS,
        TaskCategory::Unknown => UNCLASSIFIED_INSTRUCTIONS,
    }
}

/// Full prompt sent to the backend: preamble, separator, then the text.
pub fn build_prompt(category: TaskCategory, text: &str) -> String {
    format!("{}\n\nUser request:\n{text}", instructions_for(category))
}

/// Dispatcher that executes requests through a [`Provider`].
pub struct LlmDispatcher {
    provider: Arc<dyn Provider>,
    model: String,
    max_tokens: i32,
    temperature: f64,
}

impl LlmDispatcher {
    /// Create a dispatcher for `model` (already stripped of any routing
    /// prefix) with temperature 0 and the default token budget.
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, category: TaskCategory, text: &str) -> ChatRequest {
        let mut request = ChatRequest::new(
            self.model.clone(),
            vec![ChatMessage::user(build_prompt(category, text))],
        );
        request.max_tokens = Some(self.max_tokens);
        request.temperature = Some(self.temperature);
        request.response_format = Some(ResponseFormat::json_object());
        request
    }
}

#[async_trait]
impl TaskDispatcher for LlmDispatcher {
    async fn dispatch(
        &self,
        category: TaskCategory,
        text: &str,
    ) -> Result<ExecutionResult, DispatchError> {
        let request = self.build_request(category, text);

        debug!(
            provider = self.provider.name(),
            model = %self.model,
            task_type = %category,
            "dispatching request"
        );

        let response = self.provider.complete(&request).await?;
        let raw = response.first_text().ok_or(DispatchError::EmptyResponse)?;
        parse_object(raw)
    }
}

/// Parse backend content as a JSON object.
pub fn parse_object(raw: &str) -> Result<ExecutionResult, DispatchError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(DispatchError::InvalidJson)?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(DispatchError::NotAnObject {
            kind: json_kind(&other),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
