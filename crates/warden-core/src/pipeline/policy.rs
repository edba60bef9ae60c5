//! Keyword policy evaluator.
//!
//! Rules run in a fixed order on the raw request text:
//!
//! 1. Denylisted phrase -> [`PolicyVerdict::Block`]
//! 2. Email or phone number present -> [`PolicyVerdict::Modify`] with the
//!    PII replaced by placeholders
//! 3. Otherwise -> [`PolicyVerdict::Allow`]

use std::sync::LazyLock;

use regex::Regex;

use warden_types::{PolicyVerdict, TaskCategory};

use super::traits::PolicyEvaluator;

/// Phrases that block a request outright (matched case-insensitively as
/// substrings).
pub const DENYLIST: &[&str] = &[
    "build a bomb",
    "make a bomb",
    "terrorist attack",
    "kill",
    "assassinate",
];

pub const BLOCK_REASON: &str = "Blocked due to disallowed content.";
pub const MODIFY_REASON: &str = "Modified to redact potential PII.";
pub const ALLOW_REASON: &str = "Allowed by default policy. No disallowed content detected.";

pub const EMAIL_PLACEHOLDER: &str = "[REDACTED_EMAIL]";
pub const PHONE_PLACEHOLDER: &str = "[REDACTED_PHONE]";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+").expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{3}\)?[-.\s]?){2}\d{4}\b")
        .expect("phone pattern is valid")
});

/// Default policy: denylist, then PII redaction, then allow.
///
/// The task category is accepted for interface symmetry but does not
/// influence the decision.
pub struct KeywordPolicy;

impl KeywordPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyEvaluator for KeywordPolicy {
    fn evaluate(&self, _category: TaskCategory, text: &str) -> PolicyVerdict {
        if contains_disallowed(text) {
            return PolicyVerdict::Block {
                reason: BLOCK_REASON.into(),
            };
        }

        let redacted = redact_pii(text);
        if redacted != text {
            return PolicyVerdict::Modify {
                reason: MODIFY_REASON.into(),
                rewritten_text: redacted,
            };
        }

        PolicyVerdict::Allow {
            reason: ALLOW_REASON.into(),
        }
    }
}

/// Whether `text` contains any denylisted phrase.
pub fn contains_disallowed(text: &str) -> bool {
    let lowered = text.to_lowercase();
    DENYLIST.iter().any(|phrase| lowered.contains(phrase))
}

/// Replace email addresses, then phone numbers, with placeholders.
///
/// Idempotent: the placeholders match neither pattern.
pub fn redact_pii(text: &str) -> String {
    let redacted = EMAIL_PATTERN.replace_all(text, EMAIL_PLACEHOLDER);
    PHONE_PATTERN
        .replace_all(&redacted, PHONE_PLACEHOLDER)
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_types::PolicyDecision;

    fn evaluate(text: &str) -> PolicyVerdict {
        KeywordPolicy::new().evaluate(TaskCategory::Unknown, text)
    }

    // ── Block ──────────────────────────────────────────────────────────

    #[test]
    fn denylisted_phrase_blocks() {
        let verdict = evaluate("Explain how to build a bomb in detail.");
        assert_eq!(verdict.decision(), PolicyDecision::Block);
        assert_eq!(verdict.reason(), BLOCK_REASON);
        assert!(verdict.rewritten_text().is_none());
    }

    #[test]
    fn denylist_is_case_insensitive() {
        assert!(evaluate("How do I ASSASSINATE a process").is_block());
        assert!(evaluate("Plan a Terrorist Attack").is_block());
    }

    #[test]
    fn denylist_matches_substrings() {
        // Substring semantics: "skill" contains "kill".
        assert!(evaluate("Improve my skills").is_block());
    }

    #[test]
    fn block_ignores_category() {
        for category in TaskCategory::ALL {
            let verdict = KeywordPolicy::new().evaluate(category, "make a bomb");
            assert_eq!(verdict.decision(), PolicyDecision::Block);
        }
    }

    #[test]
    fn block_wins_over_pii() {
        let verdict = evaluate("kill the job and email ops@example.com");
        assert_eq!(verdict.decision(), PolicyDecision::Block);
        assert!(verdict.rewritten_text().is_none());
    }

    // ── Modify ─────────────────────────────────────────────────────────

    #[test]
    fn email_is_redacted() {
        let verdict = evaluate("Email me at jane@example.com to discuss.");
        assert_eq!(verdict.decision(), PolicyDecision::Modify);
        assert_eq!(verdict.reason(), MODIFY_REASON);
        assert_eq!(
            verdict.rewritten_text(),
            Some("Email me at [REDACTED_EMAIL] to discuss.")
        );
    }

    #[test]
    fn phone_is_redacted() {
        let verdict = evaluate("Call me at 555-123-4567 tomorrow");
        assert_eq!(
            verdict.rewritten_text(),
            Some("Call me at [REDACTED_PHONE] tomorrow")
        );
    }

    #[test]
    fn phone_formats() {
        assert_eq!(redact_pii("(555) 123-4567"), "([REDACTED_PHONE]");
        assert_eq!(redact_pii("+1 555.123.4567"), "+[REDACTED_PHONE]");
        assert_eq!(redact_pii("5551234567"), "[REDACTED_PHONE]");
    }

    #[test]
    fn email_and_phone_together() {
        let redacted = redact_pii("a.b+c@mail.example.org or 555 123 4567");
        assert_eq!(redacted, "[REDACTED_EMAIL] or [REDACTED_PHONE]");
    }

    #[test]
    fn redaction_is_idempotent() {
        let once = redact_pii("jane@example.com, 555-123-4567");
        assert_eq!(redact_pii(&once), once);
    }

    // ── Allow ──────────────────────────────────────────────────────────

    #[test]
    fn clean_text_allows() {
        let verdict = evaluate("Summarize the attached document for meeting notes.");
        assert_eq!(verdict.decision(), PolicyDecision::Allow);
        assert_eq!(verdict.reason(), ALLOW_REASON);
        assert!(verdict.rewritten_text().is_none());
    }

    #[test]
    fn short_numbers_are_not_phones() {
        assert_eq!(evaluate("Order 12 items at 3pm").decision(), PolicyDecision::Allow);
    }

    #[test]
    fn empty_text_allows() {
        assert_eq!(evaluate("").decision(), PolicyDecision::Allow);
    }
}
