//! Activity repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and indexed-query APIs over the `activities` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the time-range invariant before SQL mutations.
//! - The detail reference is stored as a discriminant/id column pair and is
//!   never interpreted as an enforced foreign key.

use crate::model::activity::{Activity, ActivityDraft, ActivityId, ActivityPatch, DetailRef};
use crate::repo::{push_range_clause, RepoError, RepoResult, TimeRange};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    start,
    \"end\",
    detail_table,
    detail_id
FROM activities";

/// Repository interface for activity timeline rows.
pub trait ActivityRepository {
    fn create_activity(&self, draft: &ActivityDraft) -> RepoResult<ActivityId>;
    fn create_activity_with_id(&self, id: ActivityId, draft: &ActivityDraft) -> RepoResult<()>;
    fn get_activity(&self, id: ActivityId) -> RepoResult<Activity>;
    fn update_activity(&self, id: ActivityId, patch: &ActivityPatch) -> RepoResult<()>;
    fn delete_activity(&self, id: ActivityId) -> RepoResult<()>;
    fn list_by_start(&self, range: &TimeRange) -> RepoResult<Vec<Activity>>;
    fn list_by_end(&self, range: &TimeRange) -> RepoResult<Vec<Activity>>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn create_activity(&self, draft: &ActivityDraft) -> RepoResult<ActivityId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO activities (start, \"end\", detail_table, detail_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.start,
                draft.end,
                draft.detail.table_name(),
                draft.detail.row_id(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn create_activity_with_id(&self, id: ActivityId, draft: &ActivityDraft) -> RepoResult<()> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO activities (id, start, \"end\", detail_table, detail_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id,
                draft.start,
                draft.end,
                draft.detail.table_name(),
                draft.detail.row_id(),
            ],
        )?;

        Ok(())
    }

    fn get_activity(&self, id: ActivityId) -> RepoResult<Activity> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTIVITY_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_activity_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn update_activity(&self, id: ActivityId, patch: &ActivityPatch) -> RepoResult<()> {
        // Merge against the stored row so the range invariant can be checked
        // on the combined value, not just the patched fields.
        let mut activity = self.get_activity(id)?;
        activity.apply(patch);
        activity.validate()?;

        let changed = self.conn.execute(
            "UPDATE activities
             SET
                start = ?1,
                \"end\" = ?2,
                detail_table = ?3,
                detail_id = ?4
             WHERE id = ?5;",
            params![
                activity.start,
                activity.end,
                activity.detail.table_name(),
                activity.detail.row_id(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_activity(&self, id: ActivityId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_by_start(&self, range: &TimeRange) -> RepoResult<Vec<Activity>> {
        self.list_by_column("start", range)
    }

    fn list_by_end(&self, range: &TimeRange) -> RepoResult<Vec<Activity>> {
        self.list_by_column("\"end\"", range)
    }
}

impl SqliteActivityRepository<'_> {
    fn list_by_column(&self, column: &str, range: &TimeRange) -> RepoResult<Vec<Activity>> {
        let mut sql = ACTIVITY_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();
        push_range_clause(&mut sql, column, range, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut activities = Vec::new();

        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }

        Ok(activities)
    }
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let detail_table: String = row.get("detail_table")?;
    let detail_id: i64 = row.get("detail_id")?;
    let detail = parse_detail_ref(&detail_table, detail_id).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid detail table `{detail_table}` in activities.detail_table"
        ))
    })?;

    let activity = Activity {
        id: row.get("id")?,
        start: row.get("start")?,
        end: row.get("end")?,
        detail,
    };
    activity.validate()?;
    Ok(activity)
}

fn parse_detail_ref(table: &str, id: i64) -> Option<DetailRef> {
    match table {
        "feedings" => Some(DetailRef::Feeding(id)),
        "sleeps" => Some(DetailRef::Sleep(id)),
        _ => None,
    }
}
