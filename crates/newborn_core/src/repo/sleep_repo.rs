//! Sleep repository contracts and SQLite implementation.
//!
//! Same operation set as the feeding repository minus the feeding-specific
//! metadata queries.

use crate::model::sleep::{Sleep, SleepDraft, SleepId, SleepPatch};
use crate::repo::{push_range_clause, RepoError, RepoResult, TimeRange};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const SLEEP_SELECT_SQL: &str = "SELECT
    id,
    start,
    \"end\",
    comment
FROM sleeps";

/// Repository interface for sleep detail rows.
pub trait SleepRepository {
    fn create_sleep(&self, draft: &SleepDraft) -> RepoResult<SleepId>;
    fn create_sleep_with_id(&self, id: SleepId, draft: &SleepDraft) -> RepoResult<()>;
    fn get_sleep(&self, id: SleepId) -> RepoResult<Sleep>;
    fn update_sleep(&self, id: SleepId, patch: &SleepPatch) -> RepoResult<()>;
    fn delete_sleep(&self, id: SleepId) -> RepoResult<()>;
    fn list_by_start(&self, range: &TimeRange) -> RepoResult<Vec<Sleep>>;
    fn list_by_end(&self, range: &TimeRange) -> RepoResult<Vec<Sleep>>;
}

/// SQLite-backed sleep repository.
pub struct SqliteSleepRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSleepRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SleepRepository for SqliteSleepRepository<'_> {
    fn create_sleep(&self, draft: &SleepDraft) -> RepoResult<SleepId> {
        self.conn.execute(
            "INSERT INTO sleeps (start, \"end\", comment)
             VALUES (?1, ?2, ?3);",
            params![draft.start, draft.end, draft.comment.as_deref()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn create_sleep_with_id(&self, id: SleepId, draft: &SleepDraft) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO sleeps (id, start, \"end\", comment)
             VALUES (?1, ?2, ?3, ?4);",
            params![id, draft.start, draft.end, draft.comment.as_deref()],
        )?;

        Ok(())
    }

    fn get_sleep(&self, id: SleepId) -> RepoResult<Sleep> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SLEEP_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_sleep_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn update_sleep(&self, id: SleepId, patch: &SleepPatch) -> RepoResult<()> {
        let mut sleep = self.get_sleep(id)?;
        sleep.apply(patch);

        let changed = self.conn.execute(
            "UPDATE sleeps
             SET
                start = ?1,
                \"end\" = ?2,
                comment = ?3
             WHERE id = ?4;",
            params![sleep.start, sleep.end, sleep.comment.as_deref(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_sleep(&self, id: SleepId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM sleeps WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_by_start(&self, range: &TimeRange) -> RepoResult<Vec<Sleep>> {
        self.list_by_column("start", range)
    }

    fn list_by_end(&self, range: &TimeRange) -> RepoResult<Vec<Sleep>> {
        self.list_by_column("\"end\"", range)
    }
}

impl SqliteSleepRepository<'_> {
    fn list_by_column(&self, column: &str, range: &TimeRange) -> RepoResult<Vec<Sleep>> {
        let mut sql = SLEEP_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();
        push_range_clause(&mut sql, column, range, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut sleeps = Vec::new();

        while let Some(row) = rows.next()? {
            sleeps.push(parse_sleep_row(row)?);
        }

        Ok(sleeps)
    }
}

fn parse_sleep_row(row: &Row<'_>) -> RepoResult<Sleep> {
    Ok(Sleep {
        id: row.get("id")?,
        start: row.get("start")?,
        end: row.get("end")?,
        comment: row.get("comment")?,
    })
}
