//! Feeding detail record.
//!
//! # Responsibility
//! - Define the `feedings` row shape and its closed metadata enumerations.
//!
//! # Invariants
//! - Every field except `id` is optional; a feeding may be logged
//!   incrementally (e.g. kind chosen before timing is known).
//! - Stored enum spellings never change; they are the on-disk contract for
//!   data written by earlier versions.

use serde::{Deserialize, Serialize};

/// Engine-generated row id for `feedings`.
pub type FeedingId = i64;

/// How the feeding was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedingKind {
    #[serde(rename = "BREAST")]
    Breast,
    #[serde(rename = "BREAST_R")]
    BreastRight,
    #[serde(rename = "BREAST_L")]
    BreastLeft,
    #[serde(rename = "BOTTLE")]
    Bottle,
}

/// What was fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Liquid {
    #[serde(rename = "BREAST_MILK")]
    BreastMilk,
    #[serde(rename = "FORMULA")]
    Formula,
    #[serde(rename = "WATER")]
    Water,
    // Stored spelling predates this crate; kept as-is so existing rows keep
    // matching.
    #[serde(rename = "JUCE")]
    Juice,
}

/// One feeding entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feeding {
    /// Engine-generated row id.
    pub id: FeedingId,
    /// Unix epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Unix epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Free-text note entered by the caregiver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Serialized as `type` to match the persisted wire shape.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FeedingKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquid: Option<Liquid>,
    /// Quantity in the caller's unit; this layer does not interpret it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl Feeding {
    /// Applies a merge patch in place; `None` patch fields are untouched.
    pub fn apply(&mut self, patch: &FeedingPatch) {
        if let Some(start) = patch.start {
            self.start = Some(start);
        }
        if let Some(end) = patch.end {
            self.end = Some(end);
        }
        if let Some(comment) = &patch.comment {
            self.comment = Some(comment.clone());
        }
        if let Some(kind) = patch.kind {
            self.kind = Some(kind);
        }
        if let Some(liquid) = patch.liquid {
            self.liquid = Some(liquid);
        }
        if let Some(amount) = patch.amount {
            self.amount = Some(amount);
        }
    }
}

/// Insert shape for `feedings`; the row id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedingDraft {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub comment: Option<String>,
    pub kind: Option<FeedingKind>,
    pub liquid: Option<Liquid>,
    pub amount: Option<f64>,
}

/// Merge-update shape for `feedings`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedingPatch {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub comment: Option<String>,
    pub kind: Option<FeedingKind>,
    pub liquid: Option<Liquid>,
    pub amount: Option<f64>,
}
