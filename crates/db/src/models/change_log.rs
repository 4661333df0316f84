use sqlx::FromRow;
use tfe_core::change_log::ChangeLogEntry;
use tfe_core::types::{DbId, Timestamp};

/// A row from the `change_log` table.
#[derive(Debug, Clone, FromRow)]
pub struct ChangeLogRow {
    pub id: DbId,
    pub entity: String,
    pub entity_id: String,
    pub action: String,
    pub before: Option<serde_json::Value>,
    pub after: serde_json::Value,
    pub user_id: String,
    pub created_at: Timestamp,
}

impl From<ChangeLogRow> for ChangeLogEntry {
    fn from(row: ChangeLogRow) -> Self {
        Self {
            id: row.id,
            entity: row.entity,
            entity_id: row.entity_id,
            action: row.action,
            // A JSON `null` stored in the column reads back as absent.
            before: row.before.filter(|v| !v.is_null()),
            after: row.after,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}
