//! `warden classify` / `warden check [--json]` -- offline previews.
//!
//! Neither command contacts the backend or writes to the audit trail, so
//! both work without an API key.

use warden_core::pipeline::classifier::KeywordClassifier;
use warden_core::pipeline::policy::KeywordPolicy;
use warden_core::pipeline::traits::{PolicyEvaluator, TaskClassifier};
use warden_types::{PolicyVerdict, TaskCategory};

/// Print the task category for `text`.
pub fn classify(text: &str) {
    println!("{}", KeywordClassifier::new().classify(text));
}

/// Print the category and policy verdict for `text`.
pub fn check(text: &str, json: bool) -> anyhow::Result<()> {
    let (category, verdict) = preview(text);
    if json {
        println!("{}", check_json(category, &verdict)?);
    } else {
        print!("{}", format_check(category, &verdict));
    }
    Ok(())
}

fn preview(text: &str) -> (TaskCategory, PolicyVerdict) {
    let category = KeywordClassifier::new().classify(text);
    let verdict = KeywordPolicy::new().evaluate(category, text);
    (category, verdict)
}

fn format_check(category: TaskCategory, verdict: &PolicyVerdict) -> String {
    let mut out = format!(
        "task_type: {category}\ndecision:  {}\nreason:    {}\n",
        verdict.decision(),
        verdict.reason()
    );
    if let Some(rewritten) = verdict.rewritten_text() {
        out.push_str(&format!("rewritten: {rewritten}\n"));
    }
    out
}

/// `{"task_type", "decision", "reason", "rewritten_text"}` on one line.
fn check_json(category: TaskCategory, verdict: &PolicyVerdict) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(verdict)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("task_type".into(), serde_json::to_value(category)?);
    }
    serde_json::to_string(&value)
}
