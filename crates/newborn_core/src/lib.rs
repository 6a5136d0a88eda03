//! Core storage for the newborn activity register.
//! This crate is the single source of truth for the persisted schema.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{
    Activity, ActivityDraft, ActivityId, ActivityPatch, ActivityValidationError, DetailRef,
};
pub use model::feeding::{Feeding, FeedingDraft, FeedingId, FeedingKind, FeedingPatch, Liquid};
pub use model::sleep::{Sleep, SleepDraft, SleepId, SleepPatch};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::feeding_repo::{FeedingRepository, SqliteFeedingRepository};
pub use repo::sleep_repo::{SleepRepository, SqliteSleepRepository};
pub use repo::{RepoError, RepoResult, TimeRange};
pub use store::{store_file_name, Store, STORE_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, STORE_NAME};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn store_name_matches_persisted_schema() {
        assert_eq!(STORE_NAME, "newborn-register");
    }
}
