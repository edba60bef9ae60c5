//! `warden audit` -- display the audit trail.
//!
//! # Examples
//!
//! ```text
//! warden audit show
//! warden audit show -n 5 --json
//! ```

use comfy_table::{Table, presets::UTF8_FULL};

use warden_core::pipeline::audit::read_records;
use warden_types::{AuditRecord, Config};

/// Maximum characters of `input` / `output_summary` shown in table mode.
const PREVIEW_CHARS: usize = 48;

/// Show the most recent `limit` audit records.
pub async fn audit_show(config: &Config, limit: usize, json: bool) -> anyhow::Result<()> {
    let path = config.audit.resolved_path();
    let records = read_records(&path).await?;

    if records.is_empty() {
        println!("No audit records found.");
        println!("  File: {}", path.display());
        return Ok(());
    }

    let recent = tail(&records, limit);
    if json {
        for record in recent {
            println!("{}", serde_json::to_string(record)?);
        }
    } else {
        println!("{}", render_table(recent));
        println!("{} of {} record(s) in {}", recent.len(), records.len(), path.display());
    }
    Ok(())
}

fn tail(records: &[AuditRecord], limit: usize) -> &[AuditRecord] {
    &records[records.len().saturating_sub(limit)..]
}

fn render_table(records: &[AuditRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(["TIMESTAMP", "USER", "TASK TYPE", "DECISION", "INPUT", "OUTPUT"]);
    for r in records {
        table.add_row([
            r.timestamp.clone(),
            r.user_id.clone(),
            r.task_type.to_string(),
            r.policy_decision.to_string(),
            preview(&r.input),
            preview(&r.output_summary),
        ]);
    }
    table
}

/// Truncate to [`PREVIEW_CHARS`] characters, appending "..." if truncated.
fn preview(s: &str) -> String {
    let flat = s.replace('\n', " ");
    match flat.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_types::{PolicyDecision, TaskCategory};

    fn record(id: &str) -> AuditRecord {
        AuditRecord {
            audit_id: id.into(),
            user_id: "alice".into(),
            task_type: TaskCategory::DataExtraction,
            policy_decision: PolicyDecision::Modify,
            timestamp: "2026-03-01T12:00:00.000000Z".into(),
            input: "Extract fields from [REDACTED_EMAIL]".into(),
            output_summary: String::new(),
        }
    }

    #[test]
    fn tail_keeps_most_recent() {
        let records: Vec<_> = (0..5).map(|i| record(&format!("a-{i}"))).collect();
        let recent = tail(&records, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].audit_id, "a-3");
        assert_eq!(recent[1].audit_id, "a-4");
        assert_eq!(tail(&records, 50).len(), 5);
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(100);
        let p = preview(&long);
        assert_eq!(p.len(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short\ntext"), "short text");
    }

    #[test]
    fn table_contains_wire_names() {
        let rendered = render_table(&[record("a-1")]).to_string();
        assert!(rendered.contains("data_extraction"));
        assert!(rendered.contains("modify"));
        assert!(rendered.contains("alice"));
    }

    #[tokio::test]
    async fn audit_show_handles_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.audit.path = dir.path().join("none.jsonl").display().to_string();
        audit_show(&config, 10, false).await.unwrap();
    }
}
