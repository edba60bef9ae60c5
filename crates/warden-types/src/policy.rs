//! Policy decisions and the verdict carried out of the policy evaluator.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// The three outcomes of policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyDecision {
    /// Forward the original text unchanged.
    Allow,
    /// Refuse the request; nothing is dispatched.
    Block,
    /// Forward a rewritten version of the text.
    Modify,
}

impl PolicyDecision {
    /// The wire name of this decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyDecision::Allow => "allow",
            PolicyDecision::Block => "block",
            PolicyDecision::Modify => "modify",
        }
    }
}

impl fmt::Display for PolicyDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A policy decision together with its reason and, for `Modify`, the
/// rewritten text.
///
/// Only the `Modify` variant owns rewritten text, so a rewrite can never be
/// attached to an `Allow` or `Block`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyVerdict {
    Allow {
        reason: String,
    },
    Block {
        reason: String,
    },
    Modify {
        reason: String,
        rewritten_text: String,
    },
}

impl PolicyVerdict {
    /// The bare decision.
    pub fn decision(&self) -> PolicyDecision {
        match self {
            PolicyVerdict::Allow { .. } => PolicyDecision::Allow,
            PolicyVerdict::Block { .. } => PolicyDecision::Block,
            PolicyVerdict::Modify { .. } => PolicyDecision::Modify,
        }
    }

    /// Human-readable explanation; always populated.
    pub fn reason(&self) -> &str {
        match self {
            PolicyVerdict::Allow { reason }
            | PolicyVerdict::Block { reason }
            | PolicyVerdict::Modify { reason, .. } => reason,
        }
    }

    /// The rewritten text, present iff the decision is `Modify`.
    pub fn rewritten_text(&self) -> Option<&str> {
        match self {
            PolicyVerdict::Modify { rewritten_text, .. } => Some(rewritten_text),
            PolicyVerdict::Allow { .. } | PolicyVerdict::Block { .. } => None,
        }
    }

    /// The text that should be dispatched for this verdict.
    ///
    /// `None` for `Block`: a blocked request has no effective text.
    pub fn effective_text<'a>(&'a self, original: &'a str) -> Option<&'a str> {
        match self {
            PolicyVerdict::Allow { .. } => Some(original),
            PolicyVerdict::Modify { rewritten_text, .. } => Some(rewritten_text),
            PolicyVerdict::Block { .. } => None,
        }
    }

    /// Whether this verdict stops the request before dispatch.
    pub fn is_block(&self) -> bool {
        matches!(self, PolicyVerdict::Block { .. })
    }
}

/// Flat wire form: `{"decision", "reason", "rewritten_text"}`.
#[derive(Serialize)]
struct VerdictView<'a> {
    decision: PolicyDecision,
    reason: &'a str,
    rewritten_text: Option<&'a str>,
}

impl Serialize for PolicyVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VerdictView {
            decision: self.decision(),
            reason: self.reason(),
            rewritten_text: self.rewritten_text(),
        }
        .serialize(serializer)
    }
}
