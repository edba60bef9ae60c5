//! Request orchestration.
//!
//! [`Orchestrator::orchestrate`] runs one request through the pipeline:
//!
//! ```text
//! RECEIVED -> CLASSIFIED -> POLICY_EVALUATED -> DISPATCHED | SKIPPED -> AUDITED -> RESPONDED
//! ```
//!
//! Blocked requests skip dispatch. Every request that gets past dispatch
//! is audited before a response is produced, and the response carries the
//! same `audit_id` and `timestamp` as the audit line.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use warden_types::{AuditRecord, OrchestrationResult};

use super::audit::{AuditRecorder, AuditWriteError, summarize_output};
use super::dispatcher::DispatchError;
use super::traits::{PolicyEvaluator, TaskClassifier, TaskDispatcher};

/// Why an orchestrated request did not complete.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// The execution backend failed; nothing was audited.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The audit line could not be written; the request is not reported
    /// as successful.
    #[error(transparent)]
    Audit(#[from] AuditWriteError),
}

/// Sequences classifier, policy, dispatcher and audit recorder.
///
/// Holds no per-request state, so one instance can serve concurrent
/// requests.
pub struct Orchestrator {
    classifier: Arc<dyn TaskClassifier>,
    policy: Arc<dyn PolicyEvaluator>,
    dispatcher: Arc<dyn TaskDispatcher>,
    audit: Arc<AuditRecorder>,
}

impl Orchestrator {
    pub fn new(
        classifier: Arc<dyn TaskClassifier>,
        policy: Arc<dyn PolicyEvaluator>,
        dispatcher: Arc<dyn TaskDispatcher>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            classifier,
            policy,
            dispatcher,
            audit,
        }
    }

    pub fn audit(&self) -> &AuditRecorder {
        &self.audit
    }

    /// Run one request through the full pipeline.
    pub async fn orchestrate(
        &self,
        user_id: &str,
        request_text: &str,
    ) -> Result<OrchestrationResult, OrchestrationError> {
        debug!(user_id, text = request_text, "request received");

        let category = self.classifier.classify(request_text);
        info!(user_id, task_type = %category, "request classified");

        let verdict = self.policy.evaluate(category, request_text);
        let decision = verdict.decision();
        info!(
            user_id,
            task_type = %category,
            decision = %decision,
            reason = verdict.reason(),
            "policy evaluated"
        );

        let (agent_output, audited_input) = match verdict.effective_text(request_text) {
            Some(effective) => {
                let output = match self.dispatcher.dispatch(category, effective).await {
                    Ok(output) => output,
                    Err(e) => {
                        warn!(user_id, task_type = %category, error = %e, "dispatch failed");
                        return Err(e.into());
                    }
                };
                info!(user_id, task_type = %category, "request dispatched");
                (Some(output), effective)
            }
            None => {
                info!(user_id, task_type = %category, "dispatch skipped");
                (None, request_text)
            }
        };

        let record = AuditRecord {
            audit_id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            task_type: category,
            policy_decision: decision,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            input: audited_input.to_string(),
            output_summary: summarize_output(agent_output.as_ref()),
        };

        if let Err(e) = self.audit.record(&record).await {
            warn!(user_id, audit_id = %record.audit_id, error = %e, "audit write failed");
            return Err(e.into());
        }
        info!(
            user_id,
            task_type = %category,
            decision = %decision,
            audit_id = %record.audit_id,
            "request audited"
        );

        Ok(OrchestrationResult {
            task_type: category,
            policy_decision: decision,
            agent_output,
            audit_id: record.audit_id,
            timestamp: record.timestamp,
        })
    }
}
