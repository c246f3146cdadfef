use serde::{Deserialize, Serialize};

use crate::ids::ArtifactId;
use crate::model::{CheckStatus, Enforcement};

/// What the matcher saw for one pattern in one artifact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchOutcome {
    pub found: bool,
    /// Byte offset of the first occurrence, when found.
    pub first_offset: Option<usize>,
    /// Matched text: the literal itself, or the interior of a bounded
    /// structure with the delimiters excluded.
    pub captured_span: Option<String>,
}

impl MatchOutcome {
    pub fn not_found() -> Self {
        Self { found: false, first_offset: None, captured_span: None }
    }

    pub fn literal_at(offset: usize, literal: impl Into<String>) -> Self {
        Self { found: true, first_offset: Some(offset), captured_span: Some(literal.into()) }
    }

    pub fn bounded_at(offset: usize, span: String) -> Self {
        Self { found: true, first_offset: Some(offset), captured_span: Some(span) }
    }
}

/// First-offset ordering of a set of anchors within one artifact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderOutcome {
    /// Anchor names in the order they were required to appear, restricted to
    /// anchors actually present.
    pub expected: Vec<String>,
    /// Anchor names sorted by first offset, restricted to anchors present.
    pub actual: Vec<String>,
    /// Anchors with no occurrence at all.
    pub missing: Vec<String>,
    /// Adjacent anchors sharing the same first offset. Ordering is
    /// indeterminate whenever this is non-empty.
    pub ties: Vec<(String, String)>,
    pub in_order: bool,
}

impl OrderOutcome {
    pub fn is_indeterminate(&self) -> bool {
        !self.ties.is_empty()
    }
}

/// Final verdict for one criterion. Results are only ever appended; a later
/// result with the same name supersedes earlier ones by position.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub artifact: ArtifactId,
    pub status: CheckStatus,
    pub enforcement: Enforcement,
    pub details: String,
    pub recorded_at_unix: i64,
}

impl CheckResult {
    pub fn is_fail(&self) -> bool {
        self.status == CheckStatus::Fail
    }

    /// True when any critical keyword occurs in the check name or details,
    /// case-insensitively.
    pub fn matches_keywords(&self, keywords: &[String]) -> bool {
        let name = self.name.to_lowercase();
        let details = self.details.to_lowercase();
        keywords
            .iter()
            .map(|k| k.to_lowercase())
            .any(|k| !k.is_empty() && (name.contains(&k) || details.contains(&k)))
    }
}
