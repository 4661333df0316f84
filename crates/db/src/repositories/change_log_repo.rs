//! Repository for the append-only `change_log` table.

use sqlx::PgExecutor;
use tfe_core::change_log::NewChangeLogEntry;

use crate::models::change_log::ChangeLogRow;

const COLUMNS: &str = "id, entity, entity_id, action, before, after, user_id, created_at";

pub struct ChangeLogRepo;

impl ChangeLogRepo {
    pub async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        entry: &NewChangeLogEntry,
    ) -> Result<ChangeLogRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_log (entity, entity_id, action, before, after, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeLogRow>(&query)
            .bind(&entry.entity)
            .bind(&entry.entity_id)
            .bind(&entry.action)
            .bind(&entry.before)
            .bind(&entry.after)
            .bind(&entry.user_id)
            .fetch_one(executor)
            .await
    }

    /// Newest entries first.
    pub async fn list_recent<'e, E: PgExecutor<'e>>(
        executor: E,
        limit: i64,
    ) -> Result<Vec<ChangeLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_log \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, ChangeLogRow>(&query)
            .bind(limit)
            .fetch_all(executor)
            .await
    }
}
