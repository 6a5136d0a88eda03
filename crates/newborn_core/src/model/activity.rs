//! Activity timeline record and its detail reference.
//!
//! # Responsibility
//! - Define the `activities` row shape shared by all tracked activity kinds.
//! - Make the detail-table discriminant a closed enum instead of a free-form
//!   string.
//!
//! # Invariants
//! - `end`, when present, is never earlier than `start`.
//! - `end` is written exactly once, when the activity completes.
//! - `DetailRef` is a soft reference; the pointed-to row is not guaranteed to
//!   exist.

use crate::model::feeding::FeedingId;
use crate::model::sleep::SleepId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Engine-generated row id for `activities`.
pub type ActivityId = i64;

/// Typed reference from an activity into the detail table holding its
/// specifics.
///
/// Serialized as `{ "id": n, "tableName": "feedings" | "sleeps" }` to match
/// the persisted wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DetailRefWire", into = "DetailRefWire")]
pub enum DetailRef {
    Feeding(FeedingId),
    Sleep(SleepId),
}

impl DetailRef {
    /// Returns the detail table name as stored on disk.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::Feeding(_) => "feedings",
            Self::Sleep(_) => "sleeps",
        }
    }

    /// Returns the referenced detail row id.
    pub fn row_id(self) -> i64 {
        match self {
            Self::Feeding(id) => id,
            Self::Sleep(id) => id,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
enum DetailTable {
    #[serde(rename = "feedings")]
    Feedings,
    #[serde(rename = "sleeps")]
    Sleeps,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct DetailRefWire {
    id: i64,
    #[serde(rename = "tableName")]
    table_name: DetailTable,
}

impl From<DetailRefWire> for DetailRef {
    fn from(wire: DetailRefWire) -> Self {
        match wire.table_name {
            DetailTable::Feedings => Self::Feeding(wire.id),
            DetailTable::Sleeps => Self::Sleep(wire.id),
        }
    }
}

impl From<DetailRef> for DetailRefWire {
    fn from(value: DetailRef) -> Self {
        match value {
            DetailRef::Feeding(id) => Self {
                id,
                table_name: DetailTable::Feedings,
            },
            DetailRef::Sleep(id) => Self {
                id,
                table_name: DetailTable::Sleeps,
            },
        }
    }
}

/// Timeline entry pointing at the detail record for one tracked activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Engine-generated row id.
    pub id: ActivityId,
    /// Activity begin, unix epoch milliseconds.
    pub start: i64,
    /// Activity completion, epoch milliseconds. Absent while ongoing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Serialized as `recordId` to match the persisted wire shape.
    #[serde(rename = "recordId")]
    pub detail: DetailRef,
}

impl Activity {
    /// Checks the time-range invariant on a persisted row.
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        validate_range(self.start, self.end)
    }
}

/// Insert shape for `activities`; the row id is assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityDraft {
    pub start: i64,
    pub end: Option<i64>,
    pub detail: DetailRef,
}

impl ActivityDraft {
    /// Creates a draft for an activity that just began.
    pub fn ongoing(start: i64, detail: DetailRef) -> Self {
        Self {
            start,
            end: None,
            detail,
        }
    }

    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        validate_range(self.start, self.end)
    }
}

/// Merge-update shape for `activities`; `Some` fields replace stored values,
/// `None` fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivityPatch {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub detail: Option<DetailRef>,
}

impl ActivityPatch {
    /// Patch that marks an ongoing activity as completed.
    pub fn completed(end: i64) -> Self {
        Self {
            end: Some(end),
            ..Self::default()
        }
    }
}

impl Activity {
    /// Applies a merge patch in place. The caller re-validates the result.
    pub fn apply(&mut self, patch: &ActivityPatch) {
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = Some(end);
        }
        if let Some(detail) = patch.detail {
            self.detail = detail;
        }
    }
}

/// Violation of the activity time-range invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityValidationError {
    EndBeforeStart { start: i64, end: i64 },
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndBeforeStart { start, end } => {
                write!(f, "activity end {end} is earlier than start {start}")
            }
        }
    }
}

impl Error for ActivityValidationError {}

fn validate_range(start: i64, end: Option<i64>) -> Result<(), ActivityValidationError> {
    match end {
        Some(end) if end < start => Err(ActivityValidationError::EndBeforeStart { start, end }),
        _ => Ok(()),
    }
}
