//! Sleep detail record.
//!
//! Structurally a feeding without the feeding-specific metadata; kept as its
//! own type so the two tables cannot be mixed up at compile time.

use serde::{Deserialize, Serialize};

/// Engine-generated row id for `sleeps`.
pub type SleepId = i64;

/// One sleep entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sleep {
    /// Engine-generated row id.
    pub id: SleepId,
    /// Unix epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Unix epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Free-text note entered by the caregiver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Sleep {
    /// Applies a merge patch in place; `None` patch fields are untouched.
    pub fn apply(&mut self, patch: &SleepPatch) {
        if let Some(start) = patch.start {
            self.start = Some(start);
        }
        if let Some(end) = patch.end {
            self.end = Some(end);
        }
        if let Some(comment) = &patch.comment {
            self.comment = Some(comment.clone());
        }
    }
}

/// Insert shape for `sleeps`; the row id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SleepDraft {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub comment: Option<String>,
}

/// Merge-update shape for `sleeps`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SleepPatch {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub comment: Option<String>,
}
