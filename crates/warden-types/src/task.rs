//! Task categories produced by the classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of categories a request can be classified into.
///
/// Serialized in `snake_case` (`"document_summarization"`, ...), which is
/// also the form written to the audit trail and returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Condense or summarize a document.
    DocumentSummarization,
    /// Pull structured fields out of free text.
    DataExtraction,
    /// A question asked in natural language.
    GeneralQuery,
    /// Nothing matched.
    Unknown,
}

impl TaskCategory {
    /// All categories, in classifier precedence order.
    pub const ALL: [TaskCategory; 4] = [
        TaskCategory::DocumentSummarization,
        TaskCategory::DataExtraction,
        TaskCategory::GeneralQuery,
        TaskCategory::Unknown,
    ];

    /// The wire name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::DocumentSummarization => "document_summarization",
            TaskCategory::DataExtraction => "data_extraction",
            TaskCategory::GeneralQuery => "general_query",
            TaskCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
