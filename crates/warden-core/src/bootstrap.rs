//! Dependency wiring.
//!
//! Builds a live [`Orchestrator`] from a [`Config`]: keyword classifier and
//! policy, an LLM dispatcher over the provider selected by
//! `backend.model`, and an audit recorder at `audit.path`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use warden_core::bootstrap::build_orchestrator;
//! use warden_types::config::load_config;
//!
//! let config = load_config(None)?;
//! let orchestrator = build_orchestrator(&config)?;
//! let result = orchestrator.orchestrate("user-1", "What is Rust?").await?;
//! ```

use std::sync::Arc;

use tracing::info;

use warden_llm::{LlmProviderConfig, OpenAiCompatProvider, Provider, builtin_providers, route_model};
use warden_types::config::BackendConfig;
use warden_types::{Config, Result, WardenError};

use crate::pipeline::audit::AuditRecorder;
use crate::pipeline::classifier::KeywordClassifier;
use crate::pipeline::dispatcher::LlmDispatcher;
use crate::pipeline::orchestrator::Orchestrator;
use crate::pipeline::policy::KeywordPolicy;

/// Pick the provider for `backend.model` and apply the backend overrides.
///
/// Returns the provider config and the model name with its routing prefix
/// stripped.
pub fn resolve_backend(backend: &BackendConfig) -> Result<(LlmProviderConfig, String)> {
    let (mut provider, model) =
        route_model(&backend.model, &builtin_providers()).ok_or_else(|| {
            WardenError::ConfigInvalid {
                reason: format!("no provider for model '{}'", backend.model),
            }
        })?;

    if let Some(ref base_url) = backend.base_url {
        provider.base_url = base_url.clone();
    }
    provider.timeout_secs = Some(backend.timeout_secs);

    Ok((provider, model))
}

/// Build the execution provider for `backend`.
///
/// The API key is not checked here; a missing key surfaces as a dispatch
/// failure on the first request that reaches the backend.
pub fn build_provider(backend: &BackendConfig) -> Result<(Arc<dyn Provider>, String)> {
    let (provider_config, model) = resolve_backend(backend)?;
    let provider = match backend.api_key.non_empty() {
        Some(key) => OpenAiCompatProvider::with_api_key(provider_config, key.to_string()),
        None => OpenAiCompatProvider::new(provider_config),
    };
    Ok((Arc::new(provider), model))
}

/// Build an orchestrator around an already constructed provider.
pub fn build_orchestrator_with_provider(
    config: &Config,
    provider: Arc<dyn Provider>,
    model: impl Into<String>,
) -> Orchestrator {
    let dispatcher = LlmDispatcher::new(provider, model)
        .with_max_tokens(config.backend.max_tokens)
        .with_temperature(config.backend.temperature);
    let audit_path = config.audit.resolved_path();

    info!(
        model = dispatcher.model(),
        audit_path = %audit_path.display(),
        "pipeline initialized"
    );

    Orchestrator::new(
        Arc::new(KeywordClassifier::new()),
        Arc::new(KeywordPolicy::new()),
        Arc::new(dispatcher),
        Arc::new(AuditRecorder::new(audit_path)),
    )
}

/// Build the full live orchestrator from configuration.
pub fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let (provider, model) = build_provider(&config.backend)?;
    Ok(build_orchestrator_with_provider(config, provider, model))
}
