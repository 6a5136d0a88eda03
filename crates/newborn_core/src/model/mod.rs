//! Domain records persisted by the newborn register.
//!
//! # Responsibility
//! - Define the canonical activity/feeding/sleep record shapes.
//! - Keep the wire field names stable for existing persisted data.
//!
//! # Invariants
//! - Record ids are engine-generated row ids, never reused after delete.
//! - Optional fields mean "not yet recorded" and stay absent until written.

pub mod activity;
pub mod feeding;
pub mod sleep;
