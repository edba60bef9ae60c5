//! Audit-trail records and the outward orchestration response.

use serde::{Deserialize, Serialize};

use crate::policy::PolicyDecision;
use crate::task::TaskCategory;

/// The structured payload returned by the execution backend.
///
/// Always a JSON object; its keys depend on the task category.
pub type ExecutionResult = serde_json::Map<String, serde_json::Value>;

/// One line of the audit trail.
///
/// Field order here is the field order on disk. Records are created once
/// per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique identifier of the request.
    pub audit_id: String,

    /// Identifier of the end user.
    pub user_id: String,

    /// Category assigned by the classifier.
    pub task_type: TaskCategory,

    /// Decision taken by the policy evaluator.
    pub policy_decision: PolicyDecision,

    /// Completion time, ISO-8601 UTC.
    pub timestamp: String,

    /// The text acted upon (the original text for blocked requests).
    pub input: String,

    /// Short summary of the execution result; empty if nothing ran.
    pub output_summary: String,
}

/// The response assembled for one orchestrated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Category assigned by the classifier.
    pub task_type: TaskCategory,

    /// Decision taken by the policy evaluator.
    pub policy_decision: PolicyDecision,

    /// Full backend output, `null` when the request was blocked.
    pub agent_output: Option<ExecutionResult>,

    /// Matches the `audit_id` of the audit line written for this request.
    pub audit_id: String,

    /// Completion time, ISO-8601 UTC. Same value as the audit line.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AuditRecord {
        AuditRecord {
            audit_id: "a-1".into(),
            user_id: "u-1".into(),
            task_type: TaskCategory::GeneralQuery,
            policy_decision: PolicyDecision::Allow,
            timestamp: "2026-01-01T00:00:00.000000Z".into(),
            input: "what is rust?".into(),
            output_summary: String::new(),
        }
    }

    #[test]
    fn audit_record_has_exactly_the_trail_fields() {
        let value = serde_json::to_value(record()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "audit_id",
                "input",
                "output_summary",
                "policy_decision",
                "task_type",
                "timestamp",
                "user_id"
            ]
        );
        assert_eq!(obj["task_type"], "general_query");
        assert_eq!(obj["policy_decision"], "allow");
    }

    #[test]
    fn audit_record_line_keeps_field_order() {
        let line = serde_json::to_string(&record()).unwrap();
        let audit = line.find("\"audit_id\"").unwrap();
        let summary = line.find("\"output_summary\"").unwrap();
        assert!(audit < summary);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn blocked_result_serializes_null_output() {
        let result = OrchestrationResult {
            task_type: TaskCategory::Unknown,
            policy_decision: PolicyDecision::Block,
            agent_output: None,
            audit_id: "a-2".into(),
            timestamp: "2026-01-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.as_object().unwrap().contains_key("agent_output"));
        assert!(value["agent_output"].is_null());
    }
}
