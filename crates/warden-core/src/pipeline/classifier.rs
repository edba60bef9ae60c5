//! Keyword classifier.
//!
//! Classifies incoming requests by case-insensitive substring matching.
//! Keyword groups are checked in priority order; the first match wins.
//! Requests that match no group but read as a question become
//! [`TaskCategory::GeneralQuery`]; everything else is
//! [`TaskCategory::Unknown`].

use warden_types::TaskCategory;

use super::traits::TaskClassifier;

/// A keyword pattern entry: a list of keywords and the category they map to.
struct KeywordPattern {
    keywords: &'static [&'static str],
    category: TaskCategory,
}

/// Static keyword patterns checked in priority order (first match wins).
const PATTERNS: &[KeywordPattern] = &[
    KeywordPattern {
        keywords: &[
            "summarize",
            "summary",
            "tl;dr",
            "briefly describe",
            "condense",
        ],
        category: TaskCategory::DocumentSummarization,
    },
    KeywordPattern {
        keywords: &[
            "extract",
            "pull out",
            "structured",
            "fields",
            "key information",
            "parse",
        ],
        category: TaskCategory::DataExtraction,
    },
];

/// Leading words that mark a request as a question.
const QUESTION_STARTERS: &[&str] = &["how ", "what ", "why ", "where ", "who ", "when "];

/// Heuristic keyword-based task classifier.
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Create a new keyword classifier.
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> TaskCategory {
        let text_lower = text.to_lowercase();

        for pattern in PATTERNS {
            if pattern.keywords.iter().any(|kw| text_lower.contains(kw)) {
                return pattern.category;
            }
        }

        if is_question(text_lower.trim()) {
            return TaskCategory::GeneralQuery;
        }

        TaskCategory::Unknown
    }
}

/// `text` must already be lowercased and trimmed.
fn is_question(text: &str) -> bool {
    text.ends_with('?') || QUESTION_STARTERS.iter().any(|q| text.starts_with(q))
}
