//! Pipeline stage traits.
//!
//! Each stage is represented by a trait so the orchestrator can be wired
//! with the default keyword/LLM implementations or with test doubles:
//!
//! 1. **[`TaskClassifier`]** -- Map raw text to a [`TaskCategory`]
//! 2. **[`PolicyEvaluator`]** -- Decide allow / block / modify
//! 3. **[`TaskDispatcher`]** -- Execute the request against the backend
//!
//! Audit recording is not a trait: there is exactly one append-only sink,
//! [`AuditRecorder`](super::audit::AuditRecorder).

use async_trait::async_trait;

use warden_types::{ExecutionResult, PolicyVerdict, TaskCategory};

use super::dispatcher::DispatchError;

/// Stage 1: classify a request into one of the fixed task categories.
///
/// Implementations must be deterministic and total: every input, including
/// the empty string, maps to exactly one category.
pub trait TaskClassifier: Send + Sync {
    fn classify(&self, text: &str) -> TaskCategory;
}

/// Stage 2: decide whether a request may proceed.
///
/// Implementations must be deterministic and total. A
/// [`PolicyVerdict::Modify`] carries the rewritten text the dispatcher
/// will receive instead of the original.
pub trait PolicyEvaluator: Send + Sync {
    fn evaluate(&self, category: TaskCategory, text: &str) -> PolicyVerdict;
}

/// Stage 3: execute a request against the execution backend.
///
/// Called at most once per request and never for a blocked one. Failures
/// are terminal for the request; implementations do not retry.
#[async_trait]
pub trait TaskDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        category: TaskCategory,
        text: &str,
    ) -> Result<ExecutionResult, DispatchError>;
}
