//! Feeding repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and indexed-query APIs over the `feedings` table.
//! - Map the closed kind/liquid enumerations to their stored spellings.
//!
//! # Invariants
//! - Stored enum spellings are part of the on-disk contract and must not
//!   drift from the version-1 data.
//! - Reads reject unknown stored spellings instead of masking them.

use crate::model::feeding::{Feeding, FeedingDraft, FeedingId, FeedingKind, FeedingPatch, Liquid};
use crate::repo::{push_range_clause, RepoError, RepoResult, TimeRange};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const FEEDING_SELECT_SQL: &str = "SELECT
    id,
    start,
    \"end\",
    comment,
    type,
    liquid,
    amount
FROM feedings";

/// Repository interface for feeding detail rows.
pub trait FeedingRepository {
    fn create_feeding(&self, draft: &FeedingDraft) -> RepoResult<FeedingId>;
    fn create_feeding_with_id(&self, id: FeedingId, draft: &FeedingDraft) -> RepoResult<()>;
    fn get_feeding(&self, id: FeedingId) -> RepoResult<Feeding>;
    fn update_feeding(&self, id: FeedingId, patch: &FeedingPatch) -> RepoResult<()>;
    fn delete_feeding(&self, id: FeedingId) -> RepoResult<()>;
    fn list_by_start(&self, range: &TimeRange) -> RepoResult<Vec<Feeding>>;
    fn list_by_end(&self, range: &TimeRange) -> RepoResult<Vec<Feeding>>;
    /// Equality lookup on the compound `(type, liquid)` index.
    fn list_by_kind_liquid(&self, kind: FeedingKind, liquid: Liquid) -> RepoResult<Vec<Feeding>>;
    /// Prefix lookup on the compound `(type, liquid)` index.
    fn list_by_kind(&self, kind: FeedingKind) -> RepoResult<Vec<Feeding>>;
}

/// SQLite-backed feeding repository.
pub struct SqliteFeedingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFeedingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FeedingRepository for SqliteFeedingRepository<'_> {
    fn create_feeding(&self, draft: &FeedingDraft) -> RepoResult<FeedingId> {
        self.conn.execute(
            "INSERT INTO feedings (start, \"end\", comment, type, liquid, amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.start,
                draft.end,
                draft.comment.as_deref(),
                draft.kind.map(kind_to_db),
                draft.liquid.map(liquid_to_db),
                draft.amount,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn create_feeding_with_id(&self, id: FeedingId, draft: &FeedingDraft) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO feedings (id, start, \"end\", comment, type, liquid, amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                id,
                draft.start,
                draft.end,
                draft.comment.as_deref(),
                draft.kind.map(kind_to_db),
                draft.liquid.map(liquid_to_db),
                draft.amount,
            ],
        )?;

        Ok(())
    }

    fn get_feeding(&self, id: FeedingId) -> RepoResult<Feeding> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FEEDING_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => parse_feeding_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn update_feeding(&self, id: FeedingId, patch: &FeedingPatch) -> RepoResult<()> {
        let mut feeding = self.get_feeding(id)?;
        feeding.apply(patch);

        let changed = self.conn.execute(
            "UPDATE feedings
             SET
                start = ?1,
                \"end\" = ?2,
                comment = ?3,
                type = ?4,
                liquid = ?5,
                amount = ?6
             WHERE id = ?7;",
            params![
                feeding.start,
                feeding.end,
                feeding.comment.as_deref(),
                feeding.kind.map(kind_to_db),
                feeding.liquid.map(liquid_to_db),
                feeding.amount,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_feeding(&self, id: FeedingId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM feedings WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_by_start(&self, range: &TimeRange) -> RepoResult<Vec<Feeding>> {
        self.list_by_column("start", range)
    }

    fn list_by_end(&self, range: &TimeRange) -> RepoResult<Vec<Feeding>> {
        self.list_by_column("\"end\"", range)
    }

    fn list_by_kind_liquid(&self, kind: FeedingKind, liquid: Liquid) -> RepoResult<Vec<Feeding>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FEEDING_SELECT_SQL}
             WHERE type = ?1 AND liquid = ?2
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params![kind_to_db(kind), liquid_to_db(liquid)])?;
        collect_feedings(&mut rows)
    }

    fn list_by_kind(&self, kind: FeedingKind) -> RepoResult<Vec<Feeding>> {
        let mut stmt = self.conn.prepare(&format!(
            "{FEEDING_SELECT_SQL}
             WHERE type = ?1
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query([kind_to_db(kind)])?;
        collect_feedings(&mut rows)
    }
}

impl SqliteFeedingRepository<'_> {
    fn list_by_column(&self, column: &str, range: &TimeRange) -> RepoResult<Vec<Feeding>> {
        let mut sql = FEEDING_SELECT_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();
        push_range_clause(&mut sql, column, range, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        collect_feedings(&mut rows)
    }
}

fn collect_feedings(rows: &mut rusqlite::Rows<'_>) -> RepoResult<Vec<Feeding>> {
    let mut feedings = Vec::new();
    while let Some(row) = rows.next()? {
        feedings.push(parse_feeding_row(row)?);
    }
    Ok(feedings)
}

fn parse_feeding_row(row: &Row<'_>) -> RepoResult<Feeding> {
    let kind = match row.get::<_, Option<String>>("type")? {
        Some(value) => Some(parse_kind(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid feeding type `{value}` in feedings.type"))
        })?),
        None => None,
    };

    let liquid = match row.get::<_, Option<String>>("liquid")? {
        Some(value) => Some(parse_liquid(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid liquid `{value}` in feedings.liquid"))
        })?),
        None => None,
    };

    Ok(Feeding {
        id: row.get("id")?,
        start: row.get("start")?,
        end: row.get("end")?,
        comment: row.get("comment")?,
        kind,
        liquid,
        amount: row.get("amount")?,
    })
}

fn kind_to_db(kind: FeedingKind) -> &'static str {
    match kind {
        FeedingKind::Breast => "BREAST",
        FeedingKind::BreastRight => "BREAST_R",
        FeedingKind::BreastLeft => "BREAST_L",
        FeedingKind::Bottle => "BOTTLE",
    }
}

fn parse_kind(value: &str) -> Option<FeedingKind> {
    match value {
        "BREAST" => Some(FeedingKind::Breast),
        "BREAST_R" => Some(FeedingKind::BreastRight),
        "BREAST_L" => Some(FeedingKind::BreastLeft),
        "BOTTLE" => Some(FeedingKind::Bottle),
        _ => None,
    }
}

fn liquid_to_db(liquid: Liquid) -> &'static str {
    match liquid {
        Liquid::BreastMilk => "BREAST_MILK",
        Liquid::Formula => "FORMULA",
        Liquid::Water => "WATER",
        // Stored spelling kept from version-1 data.
        Liquid::Juice => "JUCE",
    }
}

fn parse_liquid(value: &str) -> Option<Liquid> {
    match value {
        "BREAST_MILK" => Some(Liquid::BreastMilk),
        "FORMULA" => Some(Liquid::Formula),
        "WATER" => Some(Liquid::Water),
        "JUCE" => Some(Liquid::Juice),
        _ => None,
    }
}
