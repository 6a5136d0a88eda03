//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the per-table data access contracts (insert, lookup, merge
//!   update, delete, indexed queries).
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`, `Constraint`) in
//!   addition to DB transport errors.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Indexed range scans return rows in ascending key order; rows lacking
//!   the indexed field are not visible to that index.

use crate::db::DbError;
use crate::model::activity::ActivityValidationError;
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity_repo;
pub mod feeding_repo;
pub mod sleep_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for register persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Lookup, update or delete addressed a row id that does not exist.
    NotFound(i64),
    /// A write violated a uniqueness or index constraint, e.g. a manually
    /// assigned id that is already taken.
    Constraint(String),
    Validation(ActivityValidationError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Constraint(message) => write!(f, "constraint violation: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::Constraint(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ActivityValidationError> for RepoError {
    fn from(value: ActivityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::Constraint(message.clone().unwrap_or_else(|| failure.to_string()));
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Inclusive bounds for a range scan over an indexed timestamp column.
///
/// `min == max` expresses an equality lookup; an unset bound leaves that side
/// of the scan open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl TimeRange {
    /// Equality lookup on the indexed column.
    pub fn at(value: i64) -> Self {
        Self {
            min: Some(value),
            max: Some(value),
        }
    }

    /// Inclusive `[min, max]` scan.
    pub fn between(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Open-ended scan from `min` upward.
    pub fn since(min: i64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }
}

/// Appends the WHERE fragment for an ascending scan of `column` to `sql`.
///
/// Rows where the column is NULL are excluded, matching the visibility rule
/// of a secondary index over an optional field.
pub(crate) fn push_range_clause(
    sql: &mut String,
    column: &str,
    range: &TimeRange,
    bind_values: &mut Vec<Value>,
) {
    sql.push_str(&format!(" WHERE {column} IS NOT NULL"));
    if let Some(min) = range.min {
        sql.push_str(&format!(" AND {column} >= ?"));
        bind_values.push(Value::Integer(min));
    }
    if let Some(max) = range.max {
        sql.push_str(&format!(" AND {column} <= ?"));
        bind_values.push(Value::Integer(max));
    }
    sql.push_str(&format!(" ORDER BY {column} ASC, id ASC"));
}
