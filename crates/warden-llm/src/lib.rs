//! Execution-backend abstraction for warden.
//!
//! This crate provides a single interface for calling a hosted model
//! through an OpenAI-compatible chat completion endpoint. It has no
//! dependency on other warden crates.
//!
//! # Architecture
//!
//! - [`Provider`] trait defines the one-shot completion call
//! - [`OpenAiCompatProvider`] implements it over HTTP
//! - [`LlmProviderConfig`] describes how to reach a provider, and
//!   [`route_model`] picks one from a prefixed model name
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use warden_llm::{builtin_providers, route_model, ChatMessage, ChatRequest, OpenAiCompatProvider, Provider};
//!
//! let (config, model) = route_model("anthropic/claude-3-5-sonnet-20241022", &builtin_providers()).unwrap();
//! let provider = OpenAiCompatProvider::new(config);
//!
//! let request = ChatRequest::new(model, vec![ChatMessage::user("What is Rust?")]);
//! let response = provider.complete(&request).await?;
//! println!("{:?}", response.first_text());
//! ```

pub mod config;
pub mod error;
pub mod openai_compat;
pub mod provider;
pub mod types;

pub use config::{LlmProviderConfig, builtin_providers, route_model};
pub use error::{ProviderError, Result};
pub use openai_compat::OpenAiCompatProvider;
pub use provider::Provider;
pub use types::{AssistantMessage, ChatMessage, ChatRequest, ChatResponse, Choice, ResponseFormat, Usage};
