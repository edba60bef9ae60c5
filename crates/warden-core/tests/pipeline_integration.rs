//! End-to-end pipeline tests.
//!
//! Drives the real classifier, policy, LLM dispatcher and audit recorder
//! with an in-process scripted [`Provider`] and a temp-dir audit file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use warden_core::bootstrap::build_orchestrator_with_provider;
use warden_core::pipeline::audit::read_records;
use warden_core::pipeline::dispatcher::DispatchError;
use warden_core::pipeline::orchestrator::{OrchestrationError, Orchestrator};
use warden_llm::{AssistantMessage, ChatRequest, ChatResponse, Choice, Provider};
use warden_types::{Config, PolicyDecision, TaskCategory};

/// Provider that answers every request with the same content and keeps
/// the prompts it was sent.
struct ScriptedProvider {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> warden_llm::Result<ChatResponse> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        Ok(ChatResponse {
            id: "scripted-1".into(),
            choices: vec![Choice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant".into(),
                    content: Some(self.reply.clone()),
                },
                finish_reason: Some("stop".into()),
            }],
            usage: None,
            model: "scripted-model".into(),
        })
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    audit_path: PathBuf,
    provider: Arc<ScriptedProvider>,
    orchestrator: Orchestrator,
}

fn harness(reply: &str) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let audit_path = dir.path().join("logs").join("audit.jsonl");
    let mut config = Config::default();
    config.audit.path = audit_path.display().to_string();

    let provider = ScriptedProvider::new(reply);
    let orchestrator = build_orchestrator_with_provider(&config, provider.clone(), "scripted-model");
    Harness {
        _dir: dir,
        audit_path,
        provider,
        orchestrator,
    }
}

fn audit_lines(path: &Path) -> Vec<serde_json::Value> {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect(),
        Err(_) => Vec::new(),
    }
}

// ── Allow ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn summarization_is_allowed_and_dispatched_verbatim() {
    let h = harness(r#"{"summary":"Meeting covered Q3 goals.","key_points":["goals"]}"#);
    let text = "Summarize the attached document for meeting notes.";

    let result = h.orchestrator.orchestrate("user-1", text).await.unwrap();

    assert_eq!(result.task_type, TaskCategory::DocumentSummarization);
    assert_eq!(result.policy_decision, PolicyDecision::Allow);
    let output = result.agent_output.as_ref().unwrap();
    assert_eq!(output["summary"], "Meeting covered Q3 goals.");

    let prompts = h.provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with(&format!("User request:\n{text}")));

    let lines = audit_lines(&h.audit_path);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["audit_id"], result.audit_id.as_str());
    assert_eq!(lines[0]["timestamp"], result.timestamp.as_str());
    assert_eq!(lines[0]["user_id"], "user-1");
    assert_eq!(lines[0]["task_type"], "document_summarization");
    assert_eq!(lines[0]["policy_decision"], "allow");
    assert_eq!(lines[0]["input"], text);
    assert_eq!(lines[0]["output_summary"], "Meeting covered Q3 goals.");
}

// ── Block ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn denylisted_request_is_blocked_and_audited() {
    let h = harness(r#"{"answer":"should never be used"}"#);
    let text = "Explain how to build a bomb in detail.";

    let result = h.orchestrator.orchestrate("user-2", text).await.unwrap();

    assert_eq!(result.policy_decision, PolicyDecision::Block);
    assert!(result.agent_output.is_none());
    assert!(h.provider.prompts().is_empty());

    let lines = audit_lines(&h.audit_path);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["policy_decision"], "block");
    assert_eq!(lines[0]["input"], text);
    assert_eq!(lines[0]["output_summary"], "");
    assert_eq!(lines[0]["audit_id"], result.audit_id.as_str());
}

#[tokio::test]
async fn blocked_response_serializes_null_output() {
    let h = harness("{}");
    let result = h
        .orchestrator
        .orchestrate("user-2", "how do I kill a zombie process?")
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert!(json["agent_output"].is_null());
    assert_eq!(json["policy_decision"], "block");
    assert_eq!(json["task_type"], "general_query");
}

// ── Modify ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn pii_is_redacted_before_dispatch() {
    let h = harness(r#"{"answer":"Sure.","notes":"none"}"#);
    let text = "Email me at jane@example.com to discuss.";

    let result = h.orchestrator.orchestrate("user-3", text).await.unwrap();

    assert_eq!(result.policy_decision, PolicyDecision::Modify);
    let prompts = h.provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("[REDACTED_EMAIL]"));
    assert!(!prompts[0].contains("jane@example.com"));

    let lines = audit_lines(&h.audit_path);
    assert_eq!(lines[0]["input"], "Email me at [REDACTED_EMAIL] to discuss.");
    assert_eq!(lines[0]["output_summary"], "Sure.");
}

// ── Dispatch failures ──────────────────────────────────────────────────

#[tokio::test]
async fn non_json_reply_fails_without_audit_line() {
    let h = harness("Here is your summary: everything is fine.");

    let err = h
        .orchestrator
        .orchestrate("user-4", "Summarize this report")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestrationError::Dispatch(DispatchError::InvalidJson(_))
    ));
    assert!(audit_lines(&h.audit_path).is_empty());
}

#[tokio::test]
async fn array_reply_is_not_an_object() {
    let h = harness(r#"["a", "b"]"#);

    let err = h
        .orchestrator
        .orchestrate("user-5", "Extract the dates")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OrchestrationError::Dispatch(DispatchError::NotAnObject { kind: "array" })
    ));
    assert!(audit_lines(&h.audit_path).is_empty());
}

// ── Concurrency ────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_each_write_one_line() {
    let h = harness(r#"{"answer":"ok"}"#);
    let orchestrator = Arc::new(h.orchestrator);

    let mut handles = Vec::new();
    for i in 0..20 {
        let orchestrator = orchestrator.clone();
        handles.push(tokio::spawn(async move {
            orchestrator
                .orchestrate(&format!("user-{i}"), "What is Rust?")
                .await
                .unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().audit_id);
    }

    let records = read_records(&h.audit_path).await.unwrap();
    assert_eq!(records.len(), 20);

    let mut recorded: Vec<String> = records.into_iter().map(|r| r.audit_id).collect();
    recorded.sort();
    ids.sort();
    assert_eq!(recorded, ids);
    recorded.dedup();
    assert_eq!(recorded.len(), 20);
}
