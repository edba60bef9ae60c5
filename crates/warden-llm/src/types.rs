//! Request and response types for chat completion calls.
//!
//! These follow the OpenAI chat completion wire format, which most hosted
//! model APIs (including Anthropic's compatibility endpoint) accept.

use serde::{Deserialize, Serialize};

/// A message sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// The role of the message author ("system", "user", "assistant").
    pub role: String,

    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a message with role and content.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// Constraint on the shape of the completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseFormat {
    /// `"json_object"` or `"text"`.
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// Ask for a single JSON object.
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".into(),
        }
    }
}

/// A chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model identifier, without any routing prefix.
    pub model: String,

    /// The conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,

    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Output constraint (e.g. JSON object mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Create a minimal request with a model and messages.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
            response_format: None,
        }
    }
}

/// A chat completion response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    /// Unique identifier for this completion.
    #[serde(default)]
    pub id: String,

    /// The returned completions, one per requested choice.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage statistics, if reported.
    #[serde(default)]
    pub usage: Option<Usage>,

    /// The model that generated the response.
    #[serde(default)]
    pub model: String,
}

impl ChatResponse {
    /// Text of the first choice, or `None` when there is no choice or its
    /// content is null or blank.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Choice {
    /// Position of this choice in the list.
    #[serde(default)]
    pub index: i32,

    /// The assistant's message.
    pub message: AssistantMessage,

    /// Why generation stopped (e.g. "stop", "length").
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message inside a choice. Content may be null.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AssistantMessage {
    /// Usually "assistant".
    #[serde(default)]
    pub role: String,

    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage statistics for a completion request.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Usage {
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
    pub total_tokens: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_options() {
        let req = ChatRequest::new("m", vec![ChatMessage::user("hi")]);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn request_serializes_json_mode() {
        let mut req = ChatRequest::new("m", vec![ChatMessage::user("hi")]);
        req.temperature = Some(0.0);
        req.response_format = Some(ResponseFormat::json_object());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn response_with_null_content_has_no_text() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"id":"x","model":"m","choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn response_without_choices_has_no_text() {
        let resp: ChatResponse = serde_json::from_str(r#"{"id":"x","model":"m","choices":[]}"#).unwrap();
        assert!(resp.first_text().is_none());
    }

    #[test]
    fn first_text_uses_first_choice() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[
                {"index":0,"message":{"role":"assistant","content":"{\"a\":1}"}},
                {"index":1,"message":{"role":"assistant","content":"second"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text(), Some("{\"a\":1}"));
    }
}
