//! The [`Provider`] trait: the execution backend seen by the pipeline.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatRequest, ChatResponse};

/// A backend that can execute one chat completion request.
///
/// Implementations own the protocol details (authentication, request
/// formatting, status handling). The pipeline only sees a completed
/// [`ChatResponse`] or a [`ProviderError`](crate::error::ProviderError);
/// no partial result is observable.
///
/// # Example
///
/// ```rust,ignore
/// use warden_llm::{ChatMessage, ChatRequest, Provider};
///
/// async fn ask(provider: &dyn Provider) -> warden_llm::Result<Option<String>> {
///     let request = ChatRequest::new("claude-3-5-sonnet-20241022", vec![
///         ChatMessage::user("Return {\"ok\": true}"),
///     ]);
///     let response = provider.complete(&request).await?;
///     Ok(response.first_text().map(str::to_string))
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns the provider name (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Execute a chat completion request once.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse>;
}
